//! Mock implementations for testing.
//!
//! Test doubles for the trait abstractions, usable without network access
//! or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable, optionally delayed responses
//! - [`InMemoryStore`] - in-memory key-value store

pub mod http;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use store::InMemoryStore;

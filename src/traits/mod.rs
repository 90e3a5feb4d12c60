//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`KeyValueStore`] - durable storage for the session token and identity

pub mod http;
pub mod store;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use store::{KeyValueStore, TOKEN_KEY, USER_KEY};

//! quizbank - client-side session and state engine for a quiz service
//!
//! This library exposes modules for use by the CLI and integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod lifecycle;
pub mod models;
pub mod session;
pub mod traits;
pub mod validation;

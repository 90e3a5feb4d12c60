//! Error category classification.
//!
//! Categories drive where an error is shown: auth failures on the session,
//! validation failures inline on a form, resource failures on the cache.

use std::fmt;

/// High-level categorization of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication failed or the session lacks the required rights.
    Auth,

    /// Local input was rejected before reaching the network.
    User,

    /// A CRUD call against a server collection failed, including transient
    /// network failures.
    Resource,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "auth",
            ErrorCategory::User => "user",
            ErrorCategory::Resource => "resource",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::User => "Invalid input",
            ErrorCategory::Resource => "Request failed",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Auth => "Check your username and password, or sign in again",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Resource => "Please try again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! The error type returned to presentation code.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::session::AccessDenied;
use crate::validation::ValidationError;

/// Every failure the client surfaces, already normalized to a message fit
/// for display.
///
/// Transient network failures have no variant of their own: they are
/// folded into `Resource` (or `Auth` on the auth endpoints) by the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Login or registration failed.
    #[error("{message}")]
    Auth { message: String },

    /// A form was rejected locally; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A call against a server collection failed.
    #[error("{message}")]
    Resource { message: String },

    /// The session lacks the rights for the requested action.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),
}

impl ClientError {
    pub fn auth(message: impl Into<String>) -> Self {
        ClientError::Auth {
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        ClientError::Resource {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Auth { .. } | ClientError::AccessDenied(_) => ErrorCategory::Auth,
            ClientError::Validation(_) => ErrorCategory::User,
            ClientError::Resource { .. } => ErrorCategory::Resource,
        }
    }
}

//! Errors from the API layer, before normalization.

use crate::traits::HttpError;

/// Failure of a single REST call, with full detail for logging.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response
    Transport(HttpError),
    /// The server answered with a non-2xx status
    Status {
        status: u16,
        /// Parsed JSON body, if the body was JSON
        body: Option<serde_json::Value>,
    },
    /// The request body could not be serialized
    Encode(serde_json::Error),
    /// A 2xx body did not match the expected shape
    Decode(serde_json::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {}", e),
            ApiError::Status { status, body } => match body {
                Some(body) => write!(f, "Server error ({}): {}", status, body),
                None => write!(f, "Server error ({})", status),
            },
            ApiError::Encode(e) => write!(f, "Failed to encode request: {}", e),
            ApiError::Decode(e) => write!(f, "Failed to decode response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Encode(e) | ApiError::Decode(e) => Some(e),
            ApiError::Status { .. } => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Transport(e)
    }
}

//! Error handling for the quiz client.
//!
//! - **Error Categories**: where a failure is surfaced (session, form, cache)
//! - **ClientError**: the normalized error every public operation returns
//! - **Normalizer**: turns heterogeneous server/transport failures into one
//!   message
//!
//! # Example
//!
//! ```ignore
//! use quizbank::error::{ClientError, ErrorCategory};
//!
//! match questions.create(payload).await {
//!     Ok(question) => println!("Created {}", question.id),
//!     Err(err) if err.category() == ErrorCategory::Resource => form.show_inline(err.to_string()),
//!     Err(err) => eprintln!("Error: {}", err),
//! }
//! ```
//!
//! | Category | Raised by | Shown on |
//! |----------|-----------|----------|
//! | Auth | login, register, access checks | session `last_error` |
//! | User | validation rules | the form, inline |
//! | Resource | cache fetch/create/update/delete | cache `last_error` and the caller |

mod category;
mod client_error;
pub mod normalize;

pub use category::ErrorCategory;
pub use client_error::ClientError;
pub use normalize::{message_from_body, normalize};

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

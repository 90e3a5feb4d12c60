//! Pre-submission checks for the authoring and registration forms.
//!
//! Drafts hold form input as typed by the user. Structural rules (option
//! count bounds, correct-index clamping) are enforced as the draft is
//! edited; content rules are checked by `validate` and again before a
//! payload is built. Nothing here touches the network.

mod question;
mod quiz;
mod registration;

pub use question::{parse_keywords, QuestionDraft};
pub use quiz::QuizDraft;
pub use registration::RegistrationDraft;

use thiserror::Error;

use crate::models::{MAX_OPTIONS, MIN_OPTIONS};

/// A form rule that rejected the input. The display text is the inline
/// message shown on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Question text is required")]
    QuestionTextRequired,

    #[error("At least 2 options are required")]
    NotEnoughOptions,

    #[error("Correct answer option must not be empty")]
    CorrectOptionEmpty,

    #[error("Title is required")]
    TitleRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username and password are required")]
    CredentialsRequired,

    #[error("A question can have at most {} options", MAX_OPTIONS)]
    TooManyOptions,

    #[error("A question needs at least {} options", MIN_OPTIONS)]
    TooFewOptions,

    #[error("Option {index} does not exist")]
    OptionOutOfRange { index: usize },
}

use super::ValidationError;
use crate::models::Credentials;

/// The sign-up form: credentials plus a password confirmation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::CredentialsRequired);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Validate and produce the credentials sent to the register endpoint.
    pub fn to_credentials(&self) -> Result<Credentials, ValidationError> {
        self.validate()?;
        Ok(Credentials::new(self.username.trim(), self.password.clone()))
    }
}

impl std::fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

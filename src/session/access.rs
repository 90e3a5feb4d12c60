use thiserror::Error;

use crate::models::Identity;

/// What a view or command requires of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// Why the session failed an [`Access`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("Please sign in to continue")]
    NotAuthenticated,

    #[error("Admin access required")]
    NotAdmin,
}

impl Access {
    /// Check an optional identity against this requirement.
    pub fn check(&self, identity: Option<&Identity>) -> Result<(), AccessDenied> {
        match (self, identity) {
            (Access::Public, _) => Ok(()),
            (_, None) => Err(AccessDenied::NotAuthenticated),
            (Access::Admin, Some(identity)) if !identity.is_admin => Err(AccessDenied::NotAdmin),
            _ => Ok(()),
        }
    }
}

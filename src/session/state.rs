use crate::lifecycle::{LifecycleTracker, RequestLifecycle};
use crate::models::Identity;

/// Point-in-time view of the session.
///
/// `identity` and `token` are either both set or both absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub token: Option<String>,
    pub lifecycle: RequestLifecycle,
    pub last_error: Option<String>,
    pub register_success: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().map_or(false, |i| i.is_admin)
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("identity", &self.identity)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("lifecycle", &self.lifecycle)
            .field("last_error", &self.last_error)
            .field("register_success", &self.register_success)
            .finish()
    }
}

/// Mutable state behind the store's lock.
#[derive(Default)]
pub(super) struct Inner {
    pub identity: Option<Identity>,
    pub token: Option<String>,
    pub tracker: LifecycleTracker,
    pub last_error: Option<String>,
    pub register_success: bool,
}

impl Inner {
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            identity: self.identity.clone(),
            token: self.token.clone(),
            lifecycle: self.tracker.state(),
            last_error: self.last_error.clone(),
            register_success: self.register_success,
        }
    }
}

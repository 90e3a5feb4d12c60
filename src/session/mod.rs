//! Session store: who is signed in, and the transitions between signed in
//! and anonymous.
//!
//! The store is an explicit handle passed to whoever needs it. Cloning it
//! is cheap and every clone sees the same state. The identity and token
//! are mirrored into a [`KeyValueStore`] under [`TOKEN_KEY`] and
//! [`USER_KEY`] so a later process can resume the session.

mod access;
mod state;

pub use access::{Access, AccessDenied};
pub use state::SessionState;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::ApiClient;
use crate::error::{normalize, ClientError};
use crate::lifecycle::{Outcome, StaleResponsePolicy};
use crate::models::{Credentials, Identity};
use crate::traits::{KeyValueStore, TOKEN_KEY, USER_KEY};

use state::Inner;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Register failed";
const LOGIN_SUPERSEDED: &str = "Sign-in superseded by a newer request";
const REGISTER_SUPERSEDED: &str = "Registration superseded by a newer request";

#[derive(Clone)]
pub struct SessionStore {
    api: Arc<ApiClient>,
    store: Arc<dyn KeyValueStore>,
    state: Arc<Mutex<Inner>>,
    policy: StaleResponsePolicy,
}

impl SessionStore {
    /// Build the store, resuming any session saved in `store`.
    ///
    /// A missing token or user, or a user entry that does not parse, starts
    /// the store anonymous. Hydration never fails.
    pub fn hydrate(api: Arc<ApiClient>, store: Arc<dyn KeyValueStore>) -> Self {
        let mut inner = Inner::default();

        match (store.get(TOKEN_KEY), store.get(USER_KEY)) {
            (Some(token), Some(user)) => match serde_json::from_str::<Identity>(&user) {
                Ok(identity) => {
                    tracing::info!(username = %identity.username, "Resumed saved session");
                    api.set_auth_token(Some(token.clone()));
                    inner.identity = Some(identity);
                    inner.token = Some(token);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring malformed saved user");
                }
            },
            (None, None) => {
                tracing::debug!("No saved session");
            }
            (token, user) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    has_user = user.is_some(),
                    "Ignoring incomplete saved session"
                );
            }
        }

        Self {
            api,
            store,
            state: Arc::new(Mutex::new(inner)),
            policy: StaleResponsePolicy::default(),
        }
    }

    /// Choose how overlapping login/register resolutions are applied.
    pub fn with_stale_responses(mut self, policy: StaleResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sign in. On success the identity and token are stored and persisted;
    /// on failure the previous session, if any, is left as it was. A
    /// resolution discarded as superseded is also reported as an error.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, ClientError> {
        let request = {
            let mut inner = self.lock();
            inner.last_error = None;
            inner.tracker.begin()
        };
        tracing::debug!(username = %credentials.username, request = %request, "Signing in");

        let result = self.api.login(credentials).await;

        let mut inner = self.lock();
        match result {
            Ok(response) => {
                if !inner.tracker.finish(request, Outcome::Success, self.policy) {
                    tracing::debug!(request = %request, "Discarding superseded login");
                    return Err(ClientError::auth(LOGIN_SUPERSEDED));
                }
                self.persist(&response.token, &response.user);
                self.api.set_auth_token(Some(response.token.clone()));
                inner.identity = Some(response.user.clone());
                inner.token = Some(response.token);
                tracing::info!(
                    username = %response.user.username,
                    admin = response.user.is_admin,
                    "Signed in"
                );
                Ok(response.user)
            }
            Err(e) => {
                let message = normalize(&e, LOGIN_FAILED);
                tracing::warn!(status = ?e.status(), error = %e, "Sign in failed");
                if inner.tracker.finish(request, Outcome::Failure, self.policy) {
                    inner.last_error = Some(message.clone());
                }
                Err(ClientError::auth(message))
            }
        }
    }

    /// Create an account. Does not sign in: success only raises the
    /// `register_success` flag.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        let request = {
            let mut inner = self.lock();
            inner.last_error = None;
            inner.register_success = false;
            inner.tracker.begin()
        };
        tracing::debug!(username = %credentials.username, "Registering");

        let result = self.api.register(credentials).await;

        let mut inner = self.lock();
        match result {
            Ok(_) => {
                tracing::info!(username = %credentials.username, "Registered");
                if !inner.tracker.finish(request, Outcome::Success, self.policy) {
                    tracing::debug!(request = %request, "Discarding superseded registration");
                    return Err(ClientError::auth(REGISTER_SUPERSEDED));
                }
                inner.register_success = true;
                Ok(())
            }
            Err(e) => {
                let message = normalize(&e, REGISTER_FAILED);
                tracing::warn!(status = ?e.status(), error = %e, "Registration failed");
                if inner.tracker.finish(request, Outcome::Failure, self.policy) {
                    inner.last_error = Some(message.clone());
                }
                Err(ClientError::auth(message))
            }
        }
    }

    /// Sign out and forget the saved session. Safe to call when already
    /// signed out.
    pub fn logout(&self) {
        let mut inner = self.lock();
        let was_signed_in = inner.identity.take().is_some();
        inner.token = None;
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.api.set_auth_token(None);
        if was_signed_in {
            tracing::info!("Signed out");
        }
    }

    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    pub fn clear_register_success(&self) {
        self.lock().register_success = false;
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().snapshot()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.lock().identity.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn register_success(&self) -> bool {
        self.lock().register_success
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.lock().identity.as_ref().map_or(false, |i| i.is_admin)
    }

    pub fn is_loading(&self) -> bool {
        self.lock().tracker.is_pending()
    }

    /// Gate an action on the current identity.
    pub fn check(&self, access: Access) -> Result<(), AccessDenied> {
        access.check(self.lock().identity.as_ref())
    }

    fn persist(&self, token: &str, identity: &Identity) {
        self.store.set(TOKEN_KEY, token);
        match serde_json::to_string(identity) {
            Ok(user) => self.store.set(USER_KEY, &user),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize user for persistence"),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.snapshot())
            .field("policy", &self.policy)
            .finish()
    }
}

//! Local mirrors of the server's question and quiz collections.
//!
//! A [`ResourceCache`] holds the last-known list, an optional focused
//! entity fetched by id, and the lifecycle of the calls that fill them.
//! Handles are cheap to clone and share state, so several calls may be in
//! flight on one cache at once. The state lock is only taken before and
//! after each network call, never across it.
//!
//! The cache changes only after the server confirms a call; there is no
//! optimistic insertion.

mod fetch;
mod mutation;
mod resource;
mod state;

pub use resource::{FailureMessages, Resource};
pub use state::ResourceCacheState;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::ApiClient;
use crate::lifecycle::StaleResponsePolicy;
use crate::models::{EntityId, Question, Quiz};

use state::Inner;

pub type QuestionCache = ResourceCache<Question>;
pub type QuizCache = ResourceCache<Quiz>;

/// Shared, server-backed collection of `T`.
pub struct ResourceCache<T> {
    api: Arc<ApiClient>,
    state: Arc<Mutex<Inner<T>>>,
    policy: StaleResponsePolicy,
}

impl<T> Clone for ResourceCache<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            policy: self.policy,
        }
    }
}

impl<T: Resource> ResourceCache<T> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(Inner::default())),
            policy: StaleResponsePolicy::default(),
        }
    }

    /// Choose how overlapping fetches resolve. See [`StaleResponsePolicy`].
    pub fn with_stale_responses(mut self, policy: StaleResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StaleResponsePolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn get(&self, id: &EntityId) -> Option<T> {
        let inner = self.lock();
        inner.position(id).map(|index| inner.items[index].clone())
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn focused(&self) -> Option<T> {
        self.lock().focused.clone()
    }

    /// Drop the focused entity, e.g. when the view showing it closes.
    ///
    /// Under [`StaleResponsePolicy::LatestIssuedWins`] a fetch-by-id still in
    /// flight will no longer repopulate it.
    pub fn clear_focused(&self) {
        let mut inner = self.lock();
        inner.focused = None;
        inner.focus.invalidate();
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }

    /// Whether a list or focused fetch is in flight.
    pub fn is_loading(&self) -> bool {
        let inner = self.lock();
        inner.list.is_pending() || inner.focus.is_pending()
    }

    /// Whether a create, update or delete is in flight.
    pub fn is_saving(&self) -> bool {
        self.lock().pending_mutations > 0
    }

    pub fn snapshot(&self) -> ResourceCacheState<T> {
        self.lock().snapshot()
    }
}

impl<T: Resource> std::fmt::Debug for ResourceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ResourceCache")
            .field("kind", &T::KIND)
            .field("items", &inner.items.len())
            .field("lifecycle", &inner.list.state())
            .field("last_error", &inner.last_error)
            .field("policy", &self.policy)
            .finish()
    }
}

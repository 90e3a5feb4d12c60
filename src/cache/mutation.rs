//! Create, update and delete operations for ResourceCache
//!
//! Mutations have no shared lifecycle; each call counts itself in
//! `pending_mutations` for as long as it is in flight and reports its own
//! outcome to the caller.

use std::sync::{Arc, Mutex};

use crate::error::{normalize, ClientError};
use crate::models::EntityId;

use super::resource::item_path;
use super::state::Inner;
use super::{Resource, ResourceCache};

/// Counts one in-flight mutation; the count drops even if the call's future
/// is dropped before it resolves.
struct PendingMutation<T> {
    state: Arc<Mutex<Inner<T>>>,
}

impl<T> PendingMutation<T> {
    fn start(state: &Arc<Mutex<Inner<T>>>) -> Self {
        state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending_mutations += 1;
        Self {
            state: Arc::clone(state),
        }
    }
}

impl<T> Drop for PendingMutation<T> {
    fn drop(&mut self) {
        let mut inner = self.state.lock().unwrap_or_else(|e| e.into_inner());
        inner.pending_mutations = inner.pending_mutations.saturating_sub(1);
    }
}

impl<T: Resource> ResourceCache<T> {
    /// Create an entity. The server's canonical copy (with its assigned id)
    /// is appended to `items` and returned.
    pub async fn create(&self, payload: &T::Payload) -> Result<T, ClientError> {
        let _pending = PendingMutation::start(&self.state);
        tracing::debug!(kind = T::KIND, "Creating");

        match self.api.post_json::<_, T>(T::PATH, payload).await {
            Ok(item) => {
                tracing::info!(kind = T::KIND, id = %item.id(), "Created");
                self.lock().upsert(item.clone());
                Ok(item)
            }
            Err(e) => Err(self.record_failure(&e, T::MESSAGES.create)),
        }
    }

    /// Update an entity. The matching list entry and the focused entity are
    /// replaced; an id the cache does not hold is not inserted.
    pub async fn update(&self, id: &EntityId, payload: &T::Payload) -> Result<T, ClientError> {
        let _pending = PendingMutation::start(&self.state);
        tracing::debug!(kind = T::KIND, id = %id, "Updating");

        match self.api.put_json::<_, T>(&item_path::<T>(id), payload).await {
            Ok(item) => {
                let mut inner = self.lock();
                match inner.position(id) {
                    Some(index) => inner.items[index] = item.clone(),
                    None => tracing::debug!(kind = T::KIND, id = %id, "Updated entity not cached"),
                }
                if inner.focused.as_ref().map_or(false, |f| f.id() == id) {
                    inner.focused = Some(item.clone());
                }
                tracing::info!(kind = T::KIND, id = %id, "Updated");
                Ok(item)
            }
            Err(e) => Err(self.record_failure(&e, T::MESSAGES.update)),
        }
    }

    /// Delete an entity and drop it from the cache. Returns the deleted id.
    pub async fn delete(&self, id: &EntityId) -> Result<EntityId, ClientError> {
        let _pending = PendingMutation::start(&self.state);
        tracing::debug!(kind = T::KIND, id = %id, "Deleting");

        match self.api.delete(&item_path::<T>(id)).await {
            Ok(()) => {
                let mut inner = self.lock();
                inner.items.retain(|item| item.id() != id);
                if inner.focused.as_ref().map_or(false, |f| f.id() == id) {
                    inner.focused = None;
                }
                tracing::info!(kind = T::KIND, id = %id, "Deleted");
                Ok(id.clone())
            }
            Err(e) => Err(self.record_failure(&e, T::MESSAGES.delete)),
        }
    }

    fn record_failure(&self, error: &crate::api::ApiError, fallback: &str) -> ClientError {
        let message = normalize(error, fallback);
        tracing::warn!(kind = T::KIND, status = ?error.status(), error = %error, "{}", fallback);
        self.lock().last_error = Some(message.clone());
        ClientError::resource(message)
    }
}

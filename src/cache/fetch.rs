//! List and fetch-by-id operations for ResourceCache

use crate::error::{normalize, ClientError};
use crate::lifecycle::Outcome;
use crate::models::EntityId;

use super::resource::item_path;
use super::{Resource, ResourceCache};

impl<T: Resource> ResourceCache<T> {
    /// Reload the list from the server.
    ///
    /// Success replaces `items` wholesale; failure keeps the current list
    /// and records `last_error`. When calls overlap, which resolution is
    /// kept depends on the cache's [`StaleResponsePolicy`](crate::lifecycle::StaleResponsePolicy).
    pub async fn fetch_all(&self) -> Result<Vec<T>, ClientError> {
        let request = {
            let mut inner = self.lock();
            inner.last_error = None;
            inner.list.begin()
        };
        tracing::debug!(kind = T::KIND, request = %request, "Fetching list");

        let result = self.api.get_json::<Vec<T>>(T::PATH).await;

        let mut inner = self.lock();
        match result {
            Ok(items) => {
                if inner.list.finish(request, Outcome::Success, self.policy) {
                    tracing::debug!(kind = T::KIND, count = items.len(), "List fetched");
                    inner.replace_items(items.clone());
                } else {
                    tracing::debug!(kind = T::KIND, request = %request, "Discarding stale list");
                }
                Ok(items)
            }
            Err(e) => {
                let message = normalize(&e, T::MESSAGES.fetch_all);
                tracing::warn!(kind = T::KIND, status = ?e.status(), error = %e, "List fetch failed");
                if inner.list.finish(request, Outcome::Failure, self.policy) {
                    inner.last_error = Some(message.clone());
                }
                Err(ClientError::resource(message))
            }
        }
    }

    /// Fetch one entity into `focused`. The list is not touched.
    pub async fn fetch_one(&self, id: &EntityId) -> Result<T, ClientError> {
        let request = {
            let mut inner = self.lock();
            inner.last_error = None;
            inner.focus.begin()
        };
        tracing::debug!(kind = T::KIND, id = %id, "Fetching");

        let result = self.api.get_json::<T>(&item_path::<T>(id)).await;

        let mut inner = self.lock();
        match result {
            Ok(item) => {
                if inner.focus.finish(request, Outcome::Success, self.policy) {
                    inner.focused = Some(item.clone());
                } else {
                    tracing::debug!(kind = T::KIND, id = %id, "Discarding stale fetch");
                }
                Ok(item)
            }
            Err(e) => {
                let message = normalize(&e, T::MESSAGES.fetch_one);
                tracing::warn!(kind = T::KIND, id = %id, status = ?e.status(), error = %e, "Fetch failed");
                if inner.focus.finish(request, Outcome::Failure, self.policy) {
                    inner.last_error = Some(message.clone());
                }
                Err(ClientError::resource(message))
            }
        }
    }
}

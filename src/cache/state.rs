use crate::lifecycle::{LifecycleTracker, RequestLifecycle};
use crate::models::EntityId;

use super::Resource;

/// Point-in-time view of a cache, for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCacheState<T> {
    /// Server list, unique by id, in server order plus local appends
    pub items: Vec<T>,
    /// Lifecycle of the list fetch
    pub lifecycle: RequestLifecycle,
    /// Lifecycle of the fetch-by-id that fills `focused`
    pub focus_lifecycle: RequestLifecycle,
    pub last_error: Option<String>,
    pub focused: Option<T>,
    /// Create/update/delete calls still in flight
    pending_mutations: usize,
}

impl<T> ResourceCacheState<T> {
    pub fn pending_mutations(&self) -> usize {
        self.pending_mutations
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_pending() || self.focus_lifecycle.is_pending()
    }
}

pub(super) struct Inner<T> {
    pub items: Vec<T>,
    pub list: LifecycleTracker,
    pub focus: LifecycleTracker,
    pub last_error: Option<String>,
    pub focused: Option<T>,
    pub pending_mutations: usize,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            list: LifecycleTracker::new(),
            focus: LifecycleTracker::new(),
            last_error: None,
            focused: None,
            pending_mutations: 0,
        }
    }
}

impl<T: Resource> Inner<T> {
    pub fn snapshot(&self) -> ResourceCacheState<T> {
        ResourceCacheState {
            items: self.items.clone(),
            lifecycle: self.list.state(),
            focus_lifecycle: self.focus.state(),
            last_error: self.last_error.clone(),
            focused: self.focused.clone(),
            pending_mutations: self.pending_mutations,
        }
    }

    pub fn position(&self, id: &EntityId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Replace the list, dropping repeated ids after their first occurrence.
    pub fn replace_items(&mut self, items: Vec<T>) {
        let mut unique: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().any(|seen| seen.id() == item.id()) {
                tracing::warn!(kind = T::KIND, id = %item.id(), "Dropping duplicate id from server list");
                continue;
            }
            unique.push(item);
        }
        self.items = unique;
    }

    /// Append, or replace in place if the id is already listed.
    pub fn upsert(&mut self, item: T) {
        match self.position(item.id()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }
}

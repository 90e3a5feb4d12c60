//! In-memory key-value store for testing.
//!
//! Provides a [`KeyValueStore`] that keeps entries in memory, suitable for
//! testing session persistence without touching the file system.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::KeyValueStore;

/// In-memory key-value store.
///
/// Clones share the same entries, so a test can hand one clone to the
/// session store and inspect the other.
///
/// # Example
///
/// ```ignore
/// use quizbank::adapters::InMemoryStore;
/// use quizbank::traits::{KeyValueStore, USER_KEY};
///
/// let store = InMemoryStore::with_entries([(USER_KEY, "{not json")]);
/// assert_eq!(store.get(USER_KEY).as_deref(), Some("{not json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    /// Copy of all entries (for assertions).
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

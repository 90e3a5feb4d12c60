//! Durable key-value store trait abstraction.
//!
//! The session layer persists its token and identity through this trait.
//! Access is synchronous and infallible from the caller's point of view:
//! implementations that can fail (such as the file store) log and swallow
//! their errors.

/// Key under which the raw credential token is stored.
pub const TOKEN_KEY: &str = "token";

/// Key under which the serialized identity is stored.
pub const USER_KEY: &str = "user";

/// Trait for a small string key-value store.
///
/// # Example
///
/// ```ignore
/// use quizbank::adapters::InMemoryStore;
/// use quizbank::traits::{KeyValueStore, TOKEN_KEY};
///
/// let store = InMemoryStore::new();
/// store.set(TOKEN_KEY, "t1");
/// assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t1"));
/// store.remove(TOKEN_KEY);
/// assert!(store.get(TOKEN_KEY).is_none());
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

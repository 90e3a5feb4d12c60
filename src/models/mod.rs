//! Domain models shared by the session, caches and grading.
//!
//! Wire names follow the server's camelCase JSON. Ids may arrive as strings
//! or integers, under `id` or `_id`.

mod id;
mod identity;
mod question;
mod quiz;
mod request;

pub use id::EntityId;
pub use identity::Identity;
pub use question::{Question, QuestionLookup, MAX_OPTIONS, MIN_OPTIONS};
pub use quiz::{QuestionRef, Quiz};
pub use request::{Credentials, LoginResponse, QuestionPayload, QuizPayload, RegisterResponse};

use serde::{Deserialize, Deserializer};

/// Pick the entity id from a payload that may carry `_id`, `id` or both.
/// `_id` wins when both are present.
pub(crate) fn pick_id(object_id: Option<EntityId>, id: Option<EntityId>) -> Result<EntityId, String> {
    object_id
        .or(id)
        .ok_or_else(|| "missing field `id` or `_id`".to_string())
}

/// Helper to deserialize nullable strings as empty string
/// Handles both missing fields and explicit null values
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

use serde::{Deserialize, Serialize};

use super::{pick_id, EntityId};

/// The authenticated user.
///
/// Older servers send the admin flag as `admin` and the id as `_id`; both
/// are accepted. Serialization always uses `id` and `isAdmin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "IdentityWire")]
pub struct Identity {
    pub id: EntityId,
    pub username: String,
    pub is_admin: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityWire {
    #[serde(default, rename = "_id")]
    object_id: Option<EntityId>,
    #[serde(default)]
    id: Option<EntityId>,
    username: String,
    #[serde(default, alias = "admin")]
    is_admin: bool,
}

impl TryFrom<IdentityWire> for Identity {
    type Error = String;

    fn try_from(wire: IdentityWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(wire.object_id, wire.id)?,
            username: wire.username,
            is_admin: wire.is_admin,
        })
    }
}

impl Identity {
    pub fn new(id: impl Into<EntityId>, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            is_admin,
        }
    }
}

use hrdesk_core::UserId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::roles::UserRole;

fn default_active() -> bool {
    true
}

/// The authenticated user's profile plus role assignment.
///
/// `role_id` keeps the raw server value so a persisted identity round-trips
/// unchanged; use [`Identity::role`] for decisions. Fields this client does
/// not model are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub email: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(rename = "roleId", default)]
    pub role_id: String,
    #[serde(rename = "isActive", alias = "active", default = "default_active")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    pub fn new(id: UserId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: String::new(),
            role_id: role.as_str().to_string(),
            active: true,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Effective role; unknown values resolve to [`UserRole::Staff`].
    pub fn role(&self) -> UserRole {
        UserRole::from_raw(&self.role_id)
    }
}

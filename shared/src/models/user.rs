//! User Model

use serde::{Deserialize, Serialize};

use super::{Notification, Role};

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Display name
    pub name: String,
    pub role: Role,
    /// Opaque credential hash (PHC string)
    pub password_hash: String,
    /// Generated account code (`AC-XXXXXXXX`)
    #[serde(rename = "ndck")]
    pub account_code: String,
    /// Mailbox, newest first
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Items this user may access; grows only, no duplicates
    #[serde(default)]
    pub unlocked_item_ids: Vec<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Add an item to the unlocked set
    ///
    /// Returns `false` if it was already unlocked.
    pub fn unlock(&mut self, item_id: &str) -> bool {
        if self.has_unlocked(item_id) {
            return false;
        }
        self.unlocked_item_ids.push(item_id.to_string());
        true
    }

    pub fn has_unlocked(&self, item_id: &str) -> bool {
        self.unlocked_item_ids.iter().any(|id| id == item_id)
    }
}

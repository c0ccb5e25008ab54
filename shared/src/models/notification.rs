//! Notification Model

use serde::{Deserialize, Serialize};

/// Mailbox entry owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub read: bool,
    /// Unix millis
    pub created_at: i64,
}

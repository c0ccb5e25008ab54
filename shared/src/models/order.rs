//! Order Model

use serde::{Deserialize, Serialize};

/// Order status
///
/// Orders only ever move forward: `new → reported → approved`.
/// Redeeming the activation code does not change the status; it is
/// tracked by [`Order::activation_used`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, payment not yet reported
    #[default]
    New,
    /// Customer reported a manual payment, waiting for an admin
    Reported,
    /// Admin confirmed the payment and issued an activation code
    Approved,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reported => "reported",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Owning user reference (String ID)
    pub user_id: String,
    /// Purchased item reference (String ID)
    pub item_id: String,
    /// Item price at creation time, never recalculated
    pub price: i64,
    pub status: OrderStatus,
    /// Unix millis
    pub reported_at: Option<i64>,
    /// Unix millis
    pub approved_at: Option<i64>,
    pub activation_code: Option<String>,
    pub activation_used: bool,
    pub seen_by_admin: bool,
    /// Unix millis
    pub created_at: i64,
}

impl Order {
    /// Whether this order belongs to the given user
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Reported and not yet surfaced in the admin pending view
    pub fn is_unseen_pending(&self) -> bool {
        self.status == OrderStatus::Reported && !self.seen_by_admin
    }
}

//! Client-related types shared between server and client
//!
//! Request/response bodies of the HTTP API. Field names are camelCase to
//! match what the browser frontend sends and reads.

use serde::{Deserialize, Serialize};

use crate::models::{Item, Notification, Order, OrderStatus, Role};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration request
///
/// Fields are optional on the wire so a missing one surfaces as a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email or username
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    /// Must be set for admin accounts
    #[serde(default)]
    pub as_admin: bool,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public user information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub ndck: String,
}

/// Current user profile (`GET /api/me`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub ndck: String,
    pub unlocked_item_ids: Vec<String>,
}

// =============================================================================
// Order API DTOs
// =============================================================================

/// Create order request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub item_id: String,
}

/// Activation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivateRequest {
    #[serde(default)]
    pub code: String,
}

/// Activation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateResponse {
    pub ok: bool,
    pub item_id: String,
}

/// Approve response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    pub ok: bool,
    pub activation_code: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Order joined with its item (`GET /api/my-orders`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItem {
    #[serde(flatten)]
    pub order: Order,
    pub item: Option<Item>,
}

/// Public view of an order owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOwner {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub ndck: String,
}

/// Reported order joined with owner and item (`GET /api/admin/pending`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrderView {
    #[serde(flatten)]
    pub order: Order,
    pub user: Option<OrderOwner>,
    pub item: Option<Item>,
}

impl PendingOrderView {
    pub fn status(&self) -> OrderStatus {
        self.order.status
    }
}

/// Admin pending badge
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingCountResponse {
    pub pending: usize,
}

/// Explicit acknowledgement of pending orders
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeRequest {
    #[serde(default)]
    pub order_ids: Vec<String>,
}

/// Number of orders newly marked as seen
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AcknowledgeResponse {
    pub acknowledged: usize,
}

// =============================================================================
// Notification API DTOs
// =============================================================================

/// Unread notification count
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: usize,
}

/// Mailbox listing
pub type NotificationList = Vec<Notification>;

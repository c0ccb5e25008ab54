//! Order lifecycle engine
//!
//! ```text
//! create ──► new ──report──► reported ──approve──► approved
//!                  ▲    │                             │
//!                  └────┘ (re-report)          activate (once)
//! ```
//!
//! Every transition is a pure function over [`Dataset`]; [`OrderLifecycle`]
//! runs it inside one store cycle so a rejected command never persists.

use std::sync::Arc;

use shared::client::{OrderOwner, OrderWithItem, PendingOrderView};
use shared::models::{Order, OrderStatus};
use shared::ErrorCode;
use thiserror::Error;

use crate::services::{codes, mailbox};
use crate::store::{Dataset, Store};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

/// Lifecycle errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already approved: {0}")]
    AlreadyApproved(String),

    #[error("Order not reported: {0}")]
    NotReported(String),

    #[error("Invalid activation code")]
    InvalidCode,

    #[error("Activation code already used")]
    CodeUsed,

    #[error("Order not approved: {0}")]
    NotApproved(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::ItemNotFound(id) => {
                AppError::new(ErrorCode::ItemNotFound).with_detail("item_id", id)
            }
            LifecycleError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
            }
            LifecycleError::AlreadyApproved(id) => {
                AppError::new(ErrorCode::OrderAlreadyApproved).with_detail("order_id", id)
            }
            LifecycleError::NotReported(id) => {
                AppError::new(ErrorCode::OrderNotReported).with_detail("order_id", id)
            }
            LifecycleError::InvalidCode => AppError::new(ErrorCode::ActivationCodeInvalid),
            LifecycleError::CodeUsed => AppError::new(ErrorCode::ActivationCodeUsed),
            LifecycleError::NotApproved(id) => {
                AppError::new(ErrorCode::OrderNotApproved).with_detail("order_id", id)
            }
            LifecycleError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("user_id", id)
            }
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Notification text sent to the owner on approval
pub fn approval_message(order_id: &str, code: &str) -> String {
    let short: String = order_id.chars().take(8).collect();
    format!("Order {} has been approved. Activation code: {}", short, code)
}

// =============================================================================
// Transitions
// =============================================================================

/// New order by an existing user for an existing item, price snapshotted
pub fn create(ds: &mut Dataset, user_id: &str, item_id: &str) -> LifecycleResult<Order> {
    if ds.user(user_id).is_none() {
        return Err(LifecycleError::UserNotFound(user_id.to_string()));
    }
    let item = ds
        .item(item_id)
        .ok_or_else(|| LifecycleError::ItemNotFound(item_id.to_string()))?;

    let order = Order {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        item_id: item.id.clone(),
        price: item.price,
        status: OrderStatus::New,
        reported_at: None,
        approved_at: None,
        activation_code: None,
        activation_used: false,
        seen_by_admin: false,
        created_at: now_millis(),
    };
    ds.orders.push(order.clone());
    Ok(order)
}

/// Owner reports a manual payment
///
/// Orders of other users look absent. Re-reporting refreshes `reportedAt`
/// and raises the admin badge again.
pub fn report(ds: &mut Dataset, order_id: &str, user_id: &str) -> LifecycleResult<Order> {
    let order = ds
        .order_mut(order_id)
        .filter(|o| o.is_owned_by(user_id))
        .ok_or_else(|| LifecycleError::OrderNotFound(order_id.to_string()))?;

    match order.status {
        OrderStatus::New | OrderStatus::Reported => {}
        OrderStatus::Approved => return Err(LifecycleError::AlreadyApproved(order.id.clone())),
    }

    order.status = OrderStatus::Reported;
    order.reported_at = Some(now_millis());
    order.seen_by_admin = false;
    Ok(order.clone())
}

fn owner_view(ds: &Dataset, user_id: &str) -> Option<OrderOwner> {
    ds.user(user_id).map(|u| OrderOwner {
        id: u.id.clone(),
        username: u.username.clone(),
        email: u.email.clone(),
        name: u.name.clone(),
        ndck: u.account_code.clone(),
    })
}

/// All reported orders, newest report first; marks them seen
pub fn list_pending(ds: &mut Dataset) -> Vec<PendingOrderView> {
    for order in ds
        .orders
        .iter_mut()
        .filter(|o| o.status == OrderStatus::Reported)
    {
        order.seen_by_admin = true;
    }

    let mut views: Vec<PendingOrderView> = ds
        .orders
        .iter()
        .filter(|o| o.status == OrderStatus::Reported)
        .map(|o| PendingOrderView {
            order: o.clone(),
            user: owner_view(ds, &o.user_id),
            item: ds.item(&o.item_id).cloned(),
        })
        .collect();
    views.sort_by(|a, b| b.order.reported_at.cmp(&a.order.reported_at));
    views
}

/// Reported orders the admin has not seen yet
pub fn pending_count(ds: &Dataset) -> usize {
    ds.orders.iter().filter(|o| o.is_unseen_pending()).count()
}

/// Mark the given reported orders seen; returns how many flipped
pub fn acknowledge_pending(ds: &mut Dataset, order_ids: &[String]) -> usize {
    let mut flipped = 0;
    for order in ds
        .orders
        .iter_mut()
        .filter(|o| o.is_unseen_pending() && order_ids.contains(&o.id))
    {
        order.seen_by_admin = true;
        flipped += 1;
    }
    flipped
}

/// Admin approves a reported order and issues its activation code
pub fn approve(ds: &mut Dataset, order_id: &str) -> LifecycleResult<String> {
    let order = ds
        .order(order_id)
        .ok_or_else(|| LifecycleError::OrderNotFound(order_id.to_string()))?;

    match order.status {
        OrderStatus::Reported => {}
        OrderStatus::New => return Err(LifecycleError::NotReported(order.id.clone())),
        OrderStatus::Approved => return Err(LifecycleError::AlreadyApproved(order.id.clone())),
    }
    let owner_id = order.user_id.clone();
    if ds.user(&owner_id).is_none() {
        return Err(LifecycleError::UserNotFound(owner_id));
    }

    let code = codes::activation_code(|c| ds.activation_code_exists(c));
    let now = now_millis();

    if let Some(order) = ds.order_mut(order_id) {
        order.status = OrderStatus::Approved;
        order.approved_at = Some(now);
        order.activation_code = Some(code.clone());
        order.seen_by_admin = true;
    }
    if let Some(owner) = ds.user_mut(&owner_id) {
        mailbox::deliver(owner, approval_message(order_id, &code));
    }

    Ok(code)
}

/// Owner redeems an activation code; returns the unlocked item id
pub fn activate(ds: &mut Dataset, code: &str, user_id: &str) -> LifecycleResult<String> {
    let code = code.trim();
    let order = ds
        .orders
        .iter()
        .find(|o| o.activation_code.as_deref() == Some(code) && o.is_owned_by(user_id))
        .ok_or(LifecycleError::InvalidCode)?;

    if order.activation_used {
        return Err(LifecycleError::CodeUsed);
    }
    if order.status != OrderStatus::Approved {
        return Err(LifecycleError::NotApproved(order.id.clone()));
    }
    let order_id = order.id.clone();
    let item_id = order.item_id.clone();

    let user = ds
        .user_mut(user_id)
        .ok_or_else(|| LifecycleError::UserNotFound(user_id.to_string()))?;
    user.unlock(&item_id);

    if let Some(order) = ds.order_mut(&order_id) {
        order.activation_used = true;
    }
    Ok(item_id)
}

/// The user's orders joined with their items
pub fn orders_for_user(ds: &Dataset, user_id: &str) -> Vec<OrderWithItem> {
    ds.orders
        .iter()
        .filter(|o| o.is_owned_by(user_id))
        .map(|o| OrderWithItem {
            order: o.clone(),
            item: ds.item(&o.item_id).cloned(),
        })
        .collect()
}

// =============================================================================
// Store-backed engine
// =============================================================================

#[derive(Debug, Clone)]
pub struct OrderLifecycle {
    store: Arc<Store>,
}

impl OrderLifecycle {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, user_id: &str, item_id: &str) -> AppResult<Order> {
        let (user_id, item_id) = (user_id.to_string(), item_id.to_string());
        let order = self
            .store
            .mutate(move |ds| Ok(create(ds, &user_id, &item_id)?))
            .await?;
        tracing::info!(order_id = %order.id, item_id = %order.item_id, price = order.price, "Order created");
        Ok(order)
    }

    pub async fn report(&self, order_id: &str, user_id: &str) -> AppResult<Order> {
        let (order_id, user_id) = (order_id.to_string(), user_id.to_string());
        let order = self
            .store
            .mutate(move |ds| Ok(report(ds, &order_id, &user_id)?))
            .await?;
        tracing::info!(order_id = %order.id, "Payment reported");
        Ok(order)
    }

    pub async fn list_pending(&self) -> AppResult<Vec<PendingOrderView>> {
        self.store.mutate(|ds| Ok(list_pending(ds))).await
    }

    pub async fn pending_count(&self) -> AppResult<usize> {
        let dataset = self.store.load().await?;
        Ok(pending_count(&dataset))
    }

    pub async fn acknowledge_pending(&self, order_ids: Vec<String>) -> AppResult<usize> {
        self.store
            .mutate(move |ds| Ok(acknowledge_pending(ds, &order_ids)))
            .await
    }

    pub async fn approve(&self, order_id: &str) -> AppResult<String> {
        let owned_id = order_id.to_string();
        let code = self
            .store
            .mutate(move |ds| Ok(approve(ds, &owned_id)?))
            .await?;
        tracing::info!(order_id = %order_id, "Order approved");
        Ok(code)
    }

    pub async fn activate(&self, code: &str, user_id: &str) -> AppResult<String> {
        let (code, owned_user) = (code.to_string(), user_id.to_string());
        let item_id = self
            .store
            .mutate(move |ds| Ok(activate(ds, &code, &owned_user)?))
            .await?;
        tracing::info!(user_id = %user_id, item_id = %item_id, "Item unlocked");
        Ok(item_id)
    }

    pub async fn orders_for_user(&self, user_id: &str) -> AppResult<Vec<OrderWithItem>> {
        let dataset = self.store.load().await?;
        Ok(orders_for_user(&dataset, user_id))
    }
}

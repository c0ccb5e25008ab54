//! Order Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::client::{
    ActivateRequest, ActivateResponse, CreateOrderRequest, OkResponse, OrderWithItem,
};
use shared::models::Order;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::require_field;
use crate::AppError;

/// Create an order for an item
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let item_id = require_field(Some(req.item_id.as_str()), "itemId")?;
    let order = state.orders.create(&user.id, item_id).await?;
    Ok(Json(order))
}

/// Report a manual payment for one of the caller's orders
pub async fn confirm(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    state.orders.report(&id, &user.id).await?;
    Ok(Json(OkResponse::ok()))
}

/// The caller's orders with their items
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<OrderWithItem>>, AppError> {
    Ok(Json(state.orders.orders_for_user(&user.id).await?))
}

/// Redeem an activation code
pub async fn activate(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, AppError> {
    let code = require_field(Some(req.code.as_str()), "code")?;
    let item_id = state.orders.activate(code, &user.id).await?;
    Ok(Json(ActivateResponse { ok: true, item_id }))
}

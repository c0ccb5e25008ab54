//! Admin Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::client::{
    AcknowledgeRequest, AcknowledgeResponse, ApproveResponse, PendingCountResponse,
    PendingOrderView,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::AppError;

/// Badge: reported orders not yet seen
pub async fn pending_count(
    State(state): State<ServerState>,
) -> Result<Json<PendingCountResponse>, AppError> {
    let pending = state.orders.pending_count().await?;
    Ok(Json(PendingCountResponse { pending }))
}

/// Reported orders, newest report first
///
/// Listing marks them seen, which clears the badge.
pub async fn pending(
    State(state): State<ServerState>,
) -> Result<Json<Vec<PendingOrderView>>, AppError> {
    Ok(Json(state.orders.list_pending().await?))
}

/// Mark specific reported orders seen
pub async fn acknowledge(
    State(state): State<ServerState>,
    Json(req): Json<AcknowledgeRequest>,
) -> Result<Json<AcknowledgeResponse>, AppError> {
    let acknowledged = state.orders.acknowledge_pending(req.order_ids).await?;
    Ok(Json(AcknowledgeResponse { acknowledged }))
}

/// Approve a reported order and issue its activation code
pub async fn approve(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApproveResponse>, AppError> {
    let activation_code = state.orders.approve(&id).await?;
    tracing::info!(order_id = %id, admin_id = %admin.id, "Approval issued");
    Ok(Json(ApproveResponse {
        ok: true,
        activation_code,
    }))
}

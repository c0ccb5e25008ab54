//! Notification Handlers

use axum::{Extension, Json, extract::State};
use shared::client::{OkResponse, UnreadCountResponse};
use shared::models::Notification;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::AppError;

/// Mailbox, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.mailbox.list(&user.id).await?))
}

pub async fn count(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let unread = state.mailbox.unread_count(&user.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

pub async fn read_all(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<OkResponse>, AppError> {
    let changed = state.mailbox.mark_all_read(&user.id).await?;
    tracing::debug!(user_id = %user.id, changed, "Notifications marked read");
    Ok(Json(OkResponse::ok()))
}

//! Catalog Handlers

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use http::header;
use shared::models::{CatalogInfo, Item, ItemQuery, PaymentSettings};

use crate::api::upload::stored_file_path;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::AppError;

/// Fixed category / subsection lists
pub async fn catalog(State(state): State<ServerState>) -> Json<CatalogInfo> {
    Json(state.catalog.reference_lists())
}

/// Items, optionally filtered by `category` and `sub`
pub async fn list_items(
    State(state): State<ServerState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<Vec<Item>>, AppError> {
    Ok(Json(state.catalog.list_items(&query).await?))
}

/// Payment display settings
pub async fn settings(State(state): State<ServerState>) -> Result<Json<PaymentSettings>, AppError> {
    Ok(Json(state.catalog.settings().await?))
}

/// Stored document of an item
///
/// Only admins and users who unlocked the item may download it.
pub async fn download(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let item = state.catalog.document_for(&user, &id).await?;
    let file_ref = item.file_path.as_deref().unwrap_or_default();
    let path = stored_file_path(&state.config.uploads_dir, file_ref)?;

    let content = tokio::fs::read(&path).await.map_err(|e| {
        tracing::warn!(item_id = %id, path = %path.display(), error = %e, "Stored document missing");
        AppError::not_found("Document file").with_detail("item_id", id.clone())
    })?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    tracing::info!(item_id = %id, user_id = %user.id, size = content.len(), "Document served");

    Ok((
        [(header::CONTENT_TYPE, mime.to_string())],
        Bytes::from(content),
    )
        .into_response())
}

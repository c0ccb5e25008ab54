//! Document Upload Handler
//!
//! Stores the uploaded file as `<millis>-<uuid><ext>` and registers a
//! catalog item pointing at it.

use std::path::Path;

use axum::Json;
use axum::extract::{Extension, Multipart, State, multipart::MultipartError};
use http::StatusCode;
use shared::models::{Item, ItemCreate};
use shared::ErrorCode;

use super::UPLOADS_PREFIX;
use crate::auth::CurrentUser;
use crate::utils::time::now_millis;
use crate::{AppError, ServerState};

/// Longest accepted file extension (without the dot)
const MAX_EXT_LEN: usize = 10;

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::new(ErrorCode::FileTooLarge)
    } else {
        AppError::validation(format!("Invalid multipart request: {}", e.body_text()))
    }
}

/// `.ext` of the original name, lowercased; empty if absent or odd
fn file_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= MAX_EXT_LEN && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Write via tmp file + rename
async fn store_file(dir: &Path, filename: &str, data: &[u8]) -> Result<(), AppError> {
    let storage_err = |e: std::io::Error| {
        tracing::error!(filename = %filename, error = %e, "Failed to store uploaded file");
        AppError::with_message(ErrorCode::FileStorageFailed, format!("Failed to store file: {}", e))
    };

    tokio::fs::create_dir_all(dir).await.map_err(storage_err)?;

    let tmp_path = dir.join(format!("{}.tmp", filename));
    tokio::fs::write(&tmp_path, data).await.map_err(storage_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, dir.join(filename)).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(storage_err(e));
    }
    Ok(())
}

/// Upload a document and create its item
///
/// Multipart fields: `file`, `category`, `sub`, `title`, `price`.
pub async fn upload(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<Item>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut input = ItemCreate::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let original = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((original, data.to_vec()));
            }
            "category" | "sub" | "title" | "price" => {
                let value = field.text().await.map_err(multipart_error)?;
                let slot = match name.as_str() {
                    "category" => &mut input.category,
                    "sub" => &mut input.sub,
                    "title" => &mut input.title,
                    _ => &mut input.price,
                };
                *slot = Some(value);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown upload field");
            }
        }
    }

    let (original_name, data) = file.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::NoFileProvided));
    }

    let filename = format!(
        "{}-{}{}",
        now_millis(),
        uuid::Uuid::new_v4(),
        file_extension(&original_name)
    );
    let uploads_dir = state.config.uploads_dir.clone();
    store_file(&uploads_dir, &filename, &data).await?;
    input.file_path = Some(format!("{}{}", UPLOADS_PREFIX, filename));

    match state.catalog.add_item(input).await {
        Ok(item) => {
            tracing::info!(
                item_id = %item.id,
                admin_id = %admin.id,
                size = data.len(),
                original_name = %original_name,
                "Document uploaded"
            );
            Ok(Json(item))
        }
        Err(e) => {
            // item rejected: drop the orphaned file
            let _ = tokio::fs::remove_file(uploads_dir.join(&filename)).await;
            Err(e)
        }
    }
}

//! Upload Routes
//!
//! Admin document upload. Stored files are not served statically; they
//! are downloaded through `/api/items/{id}/file`.

mod handler;

use std::path::{Path, PathBuf};

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::AppError;
use crate::core::ServerState;

/// URL prefix of stored file references
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Resolve a `/uploads/<name>` reference inside the uploads directory
///
/// Rejects anything that could escape it.
pub fn stored_file_path(uploads_dir: &Path, file_ref: &str) -> Result<PathBuf, AppError> {
    let filename = file_ref.strip_prefix(UPLOADS_PREFIX).unwrap_or(file_ref);

    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        tracing::warn!(file_ref = %file_ref, "Rejected stored file reference");
        return Err(AppError::validation("Invalid filename"));
    }

    Ok(uploads_dir.join(filename))
}

/// Build upload router (body limit from `MAX_UPLOAD_BYTES`)
pub fn router(max_upload_bytes: usize) -> Router<ServerState> {
    Router::new()
        .route("/api/admin/upload", post(handler::upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

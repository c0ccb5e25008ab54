//! Catalog Routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/catalog | GET | none |
//! | /api/items | GET | none |
//! | /api/settings | GET | none |
//! | /api/items/{id}/file | GET | admin or unlocked |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Public catalog reads
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/api/catalog", get(handler::catalog))
        .route("/api/items", get(handler::list_items))
        .route("/api/settings", get(handler::settings))
}

/// Authenticated document download
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/items/{id}/file", get(handler::download))
}

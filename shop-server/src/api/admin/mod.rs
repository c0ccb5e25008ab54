//! Admin Routes
//!
//! Mounted behind `require_auth` + `require_admin`.
//!
//! | Path | Method |
//! |------|--------|
//! | /api/admin/pending-count | GET |
//! | /api/admin/pending | GET |
//! | /api/admin/pending/ack | POST |
//! | /api/admin/orders/{id}/approve | POST |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/pending-count", get(handler::pending_count))
        .route("/api/admin/pending", get(handler::pending))
        .route("/api/admin/pending/ack", post(handler::acknowledge))
        .route("/api/admin/orders/{id}/approve", post(handler::approve))
}

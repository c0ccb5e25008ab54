//! Notification Routes

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/notifications", get(handler::list))
        .route("/api/notifications/count", get(handler::count))
        .route("/api/notifications/read-all", post(handler::read_all))
}

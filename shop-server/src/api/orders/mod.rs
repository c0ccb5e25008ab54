//! Order Routes
//!
//! All routes require a logged-in user and act on the caller's orders.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/order", post(handler::create))
        .route("/api/order/{id}/confirm", post(handler::confirm))
        .route("/api/my-orders", get(handler::my_orders))
        .route("/api/activate", post(handler::activate))
}

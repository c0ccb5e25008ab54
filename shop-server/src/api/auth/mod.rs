//! Account Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Public: register and login
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
}

/// Authenticated: current profile
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/me", get(handler::me))
}

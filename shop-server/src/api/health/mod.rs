//! Health check
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /health | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    /// Whether the data file can currently be read
    data_ok: bool,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let data_ok = match state.store.load().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read dataset");
            false
        }
    };

    Json(HealthResponse {
        status: if data_ok { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        data_ok,
    })
}

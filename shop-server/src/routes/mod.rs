//! Application assembly: route groups, auth layers and HTTP middleware

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::{require_admin, require_auth};
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Routes reachable without a token
fn public_routes() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::public_router())
        .merge(api::catalog::public_router())
}

/// Routes for any logged-in account
fn user_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::auth::router())
        .merge(api::catalog::router())
        .merge(api::orders::router())
        .merge(api::notifications::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}

/// Routes for admins only (`require_auth` runs first)
fn admin_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::admin::router())
        .merge(api::upload::router(state.config.max_upload_bytes))
        .route_layer(axum_middleware::from_fn(require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by oneshot tests; call `.with_state(state)`
/// on the result.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(public_routes())
        .merge(user_routes(state))
        .merge(admin_routes(state))
        // Static frontend
        .fallback_service(ServeDir::new(&state.config.public_dir))
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // Request ID - generated, then echoed on the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
}

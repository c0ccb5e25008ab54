//! Account Handlers
//!
//! Registration, login and profile

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::Registration;
use crate::services::registry::user_info;
use crate::AppError;

use shared::client::{LoginRequest, LoginResponse, OkResponse, ProfileResponse, RegisterRequest};

/// Register a new `user` account
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<OkResponse>, AppError> {
    state
        .registry
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(Json(OkResponse::ok()))
}

/// Login handler
///
/// Accepts an email or username. Admin accounts must send `asAdmin: true`.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .registry
        .authenticate(&req.login, &req.password, req.as_admin)
        .await?;

    let token = state
        .get_jwt_service()
        .generate_token(&user.id, user.role, &user.name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user_info(&user),
    }))
}

/// Current user profile
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.registry.profile(&user.id).await?;
    Ok(Json(profile))
}

use thiserror::Error;

use crate::auth::JwtError;

/// Startup and runtime errors of the server process
///
/// Request handlers use [`crate::AppError`]; this type covers what
/// happens around them (configuration, binding, I/O).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Data file error: {0}")]
    Data(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

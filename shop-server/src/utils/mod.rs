//! Utilities
//!
//! - [`AppError`] / [`ErrorBody`] re-exported from `shared::error`
//! - logging setup, input validation, time helpers

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

//! Shared types for the document shop
//!
//! Persisted data models, HTTP request/response bodies and the unified
//! error system used by the server and its clients.

pub mod client;
pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};

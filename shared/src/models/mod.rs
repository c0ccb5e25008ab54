//! Data models
//!
//! Persisted in the JSON data file and shared with the frontend (via API).
//! Field names follow the camelCase layout of the data file.

pub mod catalog;
pub mod item;
pub mod notification;
pub mod order;
pub mod role;
pub mod settings;
pub mod user;

// Re-exports
pub use catalog::*;
pub use item::*;
pub use notification::*;
pub use order::*;
pub use role::*;
pub use settings::*;
pub use user::*;

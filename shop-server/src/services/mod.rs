//! Domain services
//!
//! - [`CatalogService`] - reference lists, items, document access
//! - [`UserRegistry`] - registration, login, profile
//! - [`Mailbox`] - per-user notifications
//! - [`codes`] - activation / account code generation

pub mod catalog;
pub mod codes;
pub mod mailbox;
pub mod registry;

pub use catalog::CatalogService;
pub use mailbox::Mailbox;
pub use registry::{Registration, UserRegistry};

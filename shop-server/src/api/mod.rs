//! HTTP API
//!
//! Each submodule exposes its routers; [`crate::routes::build_app`]
//! decides which auth group they are mounted in.
//!
//! | Module | Group |
//! |--------|-------|
//! | health | public |
//! | auth | public (register, login) + user (me) |
//! | catalog | public (reads) + user (download) |
//! | orders | user |
//! | notifications | user |
//! | admin | admin |
//! | upload | admin |

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod upload;

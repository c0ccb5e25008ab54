//! Shop Server - document shop backend
//!
//! Sells downloadable documents paid by bank transfer: a buyer orders an
//! item, reports the payment, an admin approves it and hands out a
//! single-use activation code that unlocks the document.
//!
//! # Module layout
//!
//! ```text
//! shop-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # JWT, password hashing, auth middleware
//! ├── store/         # single-file JSON dataset + write gate
//! ├── services/      # catalog, accounts, notifications, code generation
//! ├── orders/        # order lifecycle
//! ├── api/           # HTTP handlers
//! ├── routes/        # route groups and middleware stack
//! └── utils/         # logging, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod orders;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderLifecycle;
pub use routes::build_app;
pub use store::Store;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger};

// Security logging macro - accepts tracing field syntax
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
       __
  ___ / /  ___  ___    ___ ___ _____  _____ ____
 (_-</ _ \/ _ \/ _ \  (_-</ -_) __/ |/ / -_) __/
/___/_//_/\___/ .__/ /___/\__/_/  |___/\__/_/
             /_/
    "#
    );
}

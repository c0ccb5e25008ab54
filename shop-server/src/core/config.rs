use std::path::{Path, PathBuf};

use shared::models::PaymentSettings;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::store::{AdminSeed, SeedConfig};

/// Default upload limit (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | WORK_DIR | `.` | base for the relative defaults below |
/// | HTTP_PORT | 3000 | |
/// | DATA_FILE | `<work_dir>/data/db.json` | the whole dataset |
/// | UPLOADS_DIR | `<work_dir>/uploads` | stored documents |
/// | PUBLIC_DIR | `<work_dir>/public` | static frontend |
/// | JWT_SECRET | generated in debug builds | at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 10080 | 7 days |
/// | ADMIN_USERNAME / ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_NAME | see [`AdminSeed`] | seed admin |
/// | MOMO_NAME / MOMO_PHONE / MOMO_QR_TEMPLATE | see [`SeedConfig`] | seed payment settings |
/// | MAX_UPLOAD_BYTES | 52428800 | multipart body limit |
/// | LOG_LEVEL / LOG_JSON / LOG_DIR | info / false / none | logging |
///
/// Seed values are only read when the data file does not exist yet.
///
/// ```ignore
/// WORK_DIR=/srv/shop HTTP_PORT=8080 cargo run -p shop-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub data_file: PathBuf,
    pub uploads_dir: PathBuf,
    pub public_dir: PathBuf,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
    pub max_upload_bytes: usize,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_or(key: &str, default: impl Into<String>) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.into())
}

fn env_path(key: &str, work_dir: &Path, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| work_dir.join(default))
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Missing variables fall back to defaults; an invalid `JWT_SECRET`
    /// is a configuration error.
    pub fn from_env() -> Result<Self> {
        let work_dir = env_or("WORK_DIR", ".");
        let base = PathBuf::from(&work_dir);

        let defaults = SeedConfig::default();
        let seed = SeedConfig {
            admin: AdminSeed {
                username: env_or("ADMIN_USERNAME", defaults.admin.username),
                email: env_or("ADMIN_EMAIL", defaults.admin.email),
                name: env_or("ADMIN_NAME", defaults.admin.name),
                password: env_or("ADMIN_PASSWORD", defaults.admin.password),
            },
            settings: PaymentSettings {
                recipient_name: env_or("MOMO_NAME", defaults.settings.recipient_name),
                recipient_phone: env_or("MOMO_PHONE", defaults.settings.recipient_phone),
                qr_template: env_or("MOMO_QR_TEMPLATE", defaults.settings.qr_template),
            },
        };

        let jwt = JwtConfig::from_env()?;

        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ServerError::Config(format!(
                        "MAX_UPLOAD_BYTES must be a positive integer, got {:?}",
                        raw
                    )));
                }
            },
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            data_file: env_path("DATA_FILE", &base, "data/db.json"),
            uploads_dir: env_path("UPLOADS_DIR", &base, "uploads"),
            public_dir: env_path("PUBLIC_DIR", &base, "public"),
            jwt,
            seed,
            max_upload_bytes,
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            work_dir,
        })
    }

    /// Self-contained configuration rooted at `work_dir`
    ///
    /// Ignores the environment; used by tests and embedders.
    pub fn with_work_dir(work_dir: impl AsRef<Path>, jwt_secret: impl Into<String>) -> Self {
        let base = work_dir.as_ref().to_path_buf();
        Self {
            work_dir: base.to_string_lossy().into_owned(),
            http_port: 3000,
            data_file: base.join("data/db.json"),
            uploads_dir: base.join("uploads"),
            public_dir: base.join("public"),
            jwt: JwtConfig::with_secret(jwt_secret),
            seed: SeedConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: "info".to_string(),
            log_json: false,
            log_dir: None,
        }
    }

    /// Create the data, uploads and public directories
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if let Some(parent) = self.data_file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(&self.uploads_dir)?;
        std::fs::create_dir_all(&self.public_dir)?;
        Ok(())
    }
}

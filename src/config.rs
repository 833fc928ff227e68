use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Health Portal";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_ADDR: &str = "HEALTH_PORTAL_ADDR";
pub const ENV_DB: &str = "HEALTH_PORTAL_DB";
pub const ENV_MAX_BODY_BYTES: &str = "HEALTH_PORTAL_MAX_BODY_BYTES";

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Files travel inline as base64, so the limit sits well above axum's 2 MB default.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot determine home directory; set {0}")]
    NoHomeDir(&'static str),
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: ENV_ADDR,
                value: addr_raw.clone(),
                reason: e.to_string(),
            })?;

        let db_path = match lookup(ENV_DB) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_db_path().ok_or(ConfigError::NoHomeDir(ENV_DB))?,
        };

        let max_body_bytes = match lookup(ENV_MAX_BODY_BYTES) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    var: ENV_MAX_BODY_BYTES,
                    value: raw.clone(),
                    reason: "expected a positive byte count".into(),
                })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            bind_addr,
            db_path,
            max_body_bytes,
        })
    }
}

/// Get the application data directory
/// ~/HealthPortal/ on all platforms
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("HealthPortal"))
}

/// Default SQLite location when `HEALTH_PORTAL_DB` is unset.
pub fn default_db_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("health.db"))
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "health_portal_lib=info,health_portal=info,tower_http=warn"
}

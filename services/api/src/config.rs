//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// 5 MiB, the usual per-origin budget of browser local storage.
pub const DEFAULT_STORE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// How new passwords are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Salted argon2id. Legacy records still verify.
    Argon2,
    /// Base64 of the Latin-1 bytes, byte-compatible with records written by the website scripts.
    Legacy,
}

impl std::str::FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "argon2" => Ok(Self::Argon2),
            "legacy" | "base64" => Ok(Self::Legacy),
            other => Err(format!("'{}' is not one of argon2, legacy", other)),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Postgres backend when set, in-memory store otherwise.
    pub database_url: Option<String>,
    pub log_level: Level,
    pub store_quota_bytes: usize,
    pub password_scheme: PasswordScheme,
    pub remote_api_base_url: Option<String>,
    pub delivery_delay: Duration,
    pub cors_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: None,
            log_level: Level::INFO,
            store_quota_bytes: DEFAULT_STORE_QUOTA_BYTES,
            password_scheme: PasswordScheme::Argon2,
            remote_api_base_url: None,
            delivery_delay: Duration::from_millis(1500),
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        // --- Store Settings ---
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let store_quota_bytes = match lookup("STORE_QUOTA_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("STORE_QUOTA_BYTES".to_string(), e.to_string())
            })?,
            None => defaults.store_quota_bytes,
        };

        let password_scheme = match lookup("PASSWORD_SCHEME") {
            Some(raw) => raw
                .parse::<PasswordScheme>()
                .map_err(|e| ConfigError::InvalidValue("PASSWORD_SCHEME".to_string(), e))?,
            None => defaults.password_scheme,
        };

        // --- Remote Endpoint Settings ---
        let remote_api_base_url = lookup("REMOTE_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let delivery_delay = match lookup("DELIVERY_DELAY_MS") {
            Some(raw) => Duration::from_millis(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("DELIVERY_DELAY_MS".to_string(), e.to_string())
            })?),
            None => defaults.delivery_delay,
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            store_quota_bytes,
            password_scheme,
            remote_api_base_url,
            delivery_delay,
            cors_origin,
        })
    }
}

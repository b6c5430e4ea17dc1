//! services/api/src/error.rs
//!
//! Startup failures of the `api` binary. Request-time failures are
//! `FormError`s and are mapped to responses in `web::rest`.

use crate::config::ConfigError;
use axum::http::header::InvalidHeaderValue;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `CORS_ORIGIN` is not usable as an `Access-Control-Allow-Origin` value.
    #[error("Invalid CORS_ORIGIN '{origin}': {source}")]
    CorsOrigin {
        origin: String,
        #[source]
        source: InvalidHeaderValue,
    },

    /// Connecting to the key-value database failed.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Binding or serving the listener failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

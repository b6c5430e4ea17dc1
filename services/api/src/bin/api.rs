//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        Argon2Encoder, DbAdapter, DisabledRemote, HttpRemoteAdapter, LegacyBase64Encoder,
        MemoryStore,
    },
    config::{Config, PasswordScheme},
    error::ApiError,
    web::{build_router, state::AppState},
};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use community_core::{
    ports::{KeyValueStore, PasswordEncoder, RemoteSubmissionService},
    CommunityStore,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Pick the Key-Value Backend ---
    let kv: Arc<dyn KeyValueStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        None => {
            warn!(
                quota_bytes = config.store_quota_bytes,
                "DATABASE_URL not set; records live in memory and are lost on restart."
            );
            Arc::new(MemoryStore::new(config.store_quota_bytes))
        }
    };

    // --- 3. Initialize Service Adapters ---
    let encoder: Arc<dyn PasswordEncoder> = match config.password_scheme {
        PasswordScheme::Argon2 => Arc::new(Argon2Encoder::default()),
        PasswordScheme::Legacy => {
            warn!("PASSWORD_SCHEME=legacy stores reversible base64 passwords.");
            Arc::new(LegacyBase64Encoder)
        }
    };

    let remote: Arc<dyn RemoteSubmissionService> = match &config.remote_api_base_url {
        Some(base_url) => {
            info!("Relaying submissions to {}", base_url);
            Arc::new(HttpRemoteAdapter::new(reqwest::Client::new(), base_url.clone()))
        }
        None => {
            info!("REMOTE_API_BASE_URL not set; thoughts are kept locally and donations are refused.");
            Arc::new(DisabledRemote)
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        community: CommunityStore::new(kv, encoder, remote),
        config: config.clone(),
    });

    // --- 5. Create the Web Router ---
    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|source| ApiError::CorsOrigin {
            origin: config.cors_origin.clone(),
            source,
        })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    let app = build_router(app_state).layer(cors);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! services/api/src/web/newsletter.rs
//!
//! Newsletter endpoints: subscribe, list subscribers, send the daily reflection.

use crate::web::rest::{form_failure, Failure, MessageResponse};
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, Serialize, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubscribeResponse {
    pub email: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionResponse {
    pub timestamp: DateTime<Utc>,
    pub recipient_count: usize,
    pub reflection: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /newsletter/subscribe - Add an email to the subscriber list
#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscribeResponse),
        (status = 400, description = "Missing or malformed email", body = MessageResponse),
        (status = 409, description = "Already subscribed", body = MessageResponse)
    )
)]
pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, Failure> {
    // 1. Validate and persist
    let email = state
        .community
        .subscribe(&req.email)
        .await
        .map_err(form_failure)?;

    // 2. Queue the welcome mail; nobody waits for it
    let delay = state.config.delivery_delay;
    let queued = email.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        info!(email = %queued, "Welcome reflection queued for delivery.");
    });

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            email,
            message: "Welcome! Check your email for the first reflection.".to_string(),
        }),
    ))
}

/// GET /newsletter/subscribers - List every subscriber in sign-up order
#[utoipa::path(
    get,
    path = "/newsletter/subscribers",
    responses(
        (status = 200, description = "All subscribers", body = [String])
    )
)]
pub async fn list_subscribers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.community.list_subscribers().await)
}

/// POST /newsletter/daily-reflection - Pick today's reflection for all subscribers
#[utoipa::path(
    post,
    path = "/newsletter/daily-reflection",
    responses(
        (status = 200, description = "Reflection dispatched", body = ReflectionResponse),
        (status = 404, description = "No subscribers yet", body = MessageResponse)
    )
)]
pub async fn daily_reflection_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReflectionResponse>, Failure> {
    let dispatch = state.community.daily_reflection().await.ok_or((
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("No subscribers yet")),
    ))?;

    Ok(Json(ReflectionResponse {
        timestamp: dispatch.timestamp,
        recipient_count: dispatch.recipient_count,
        reflection: dispatch.reflection,
    }))
}

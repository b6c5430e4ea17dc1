//! services/api/src/web/submissions.rs
//!
//! Youth-connect thoughts and donations.

use crate::web::rest::{form_failure, Failure, MessageResponse};
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use community_core::{Donation, ThoughtForm};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, Serialize, ToSchema, Default)]
#[serde(default)]
pub struct ThoughtRequest {
    pub name: String,
    pub email: String,
    pub campus: String,
    pub city: String,
    pub address: String,
    pub thought: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ThoughtResponse {
    pub message: String,
    /// False when only the local copy was kept.
    pub relayed: bool,
}

#[derive(Deserialize, Serialize, ToSchema, Default)]
#[serde(default)]
pub struct DonationRequest {
    pub name: String,
    pub amount: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub message: String,
    pub payment_url: Option<String>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /youth-connect - Share a thought
///
/// The thought is stored locally before it is relayed, so the answer is a
/// success even when the remote endpoint is down.
#[utoipa::path(
    post,
    path = "/youth-connect",
    request_body = ThoughtRequest,
    responses(
        (status = 201, description = "Thought stored", body = ThoughtResponse)
    )
)]
pub async fn thought_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThoughtRequest>,
) -> impl IntoResponse {
    let outcome = state
        .community
        .submit_thought(ThoughtForm {
            name: req.name,
            email: req.email,
            campus: req.campus,
            city: req.city,
            address: req.address,
            thought: req.thought,
        })
        .await;

    let message = if outcome.relayed {
        "Your thought has been submitted successfully! Thank you for sharing."
    } else {
        "Your thought has been saved! Thank you for sharing."
    };

    (
        StatusCode::CREATED,
        Json(ThoughtResponse {
            message: message.to_string(),
            relayed: outcome.relayed,
        }),
    )
}

/// POST /donation - Pledge a donation
#[utoipa::path(
    post,
    path = "/donation",
    request_body = DonationRequest,
    responses(
        (status = 200, description = "Donation accepted", body = DonationResponse),
        (status = 502, description = "The donation backend failed", body = MessageResponse)
    )
)]
pub async fn donation_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DonationRequest>,
) -> Result<Json<DonationResponse>, Failure> {
    let receipt = state
        .community
        .donate(Donation {
            name: req.name,
            amount: req.amount,
            message: req.message,
        })
        .await
        .map_err(form_failure)?;

    Ok(Json(DonationResponse {
        message: receipt
            .message
            .unwrap_or_else(|| "Thank you for your donation!".to_string()),
        payment_url: receipt.payment_url,
    }))
}

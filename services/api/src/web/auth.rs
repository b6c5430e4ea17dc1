//! services/api/src/web/auth.rs
//!
//! Account endpoints: signup, signin, signout, current session and password recovery.

use crate::web::rest::{form_failure, Failure, MessageResponse, SessionResponse};
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use community_core::SignupForm;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// How much of the reset token is echoed back in the response.
const TOKEN_PREVIEW_CHARS: usize = 15;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, Serialize, ToSchema, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub campus: String,
    pub city: String,
}

#[derive(Deserialize, Serialize, ToSchema, Default)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Deserialize, Serialize, ToSchema, Default)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: String,
    /// The first characters of the token, for demo deployments without mail.
    pub token_preview: String,
}

impl From<SignupRequest> for SignupForm {
    fn from(req: SignupRequest) -> Self {
        SignupForm {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            campus: req.campus,
            city: req.city,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new account and sign it in
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid form", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse)
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, Failure> {
    let session = state
        .community
        .sign_up(req.into())
        .await
        .map_err(form_failure)?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// POST /auth/signin - Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, description = "Missing email or password", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    )
)]
pub async fn signin_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<SessionResponse>, Failure> {
    let session = state
        .community
        .sign_in(&req.email, &req.password, req.remember)
        .await
        .map_err(form_failure)?;

    Ok(Json(session.into()))
}

/// POST /auth/signout - Clear the current session
#[utoipa::path(
    post,
    path = "/auth/signout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse)
    )
)]
pub async fn signout_handler(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.community.sign_out().await;
    Json(MessageResponse::new("Signed out"))
}

/// GET /auth/session - The currently signed-in user
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 404, description = "Nobody is signed in", body = MessageResponse)
    )
)]
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, Failure> {
    state
        .community
        .current_session()
        .await
        .map(|s| Json(SessionResponse::from(s)))
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new("Nobody is signed in")),
        ))
}

/// POST /auth/forgot-password - Issue a password reset token
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 202, description = "Reset instructions sent", body = ForgotPasswordResponse),
        (status = 400, description = "Missing or malformed email", body = MessageResponse),
        (status = 404, description = "No account with this email", body = MessageResponse)
    )
)]
pub async fn forgot_password_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, Failure> {
    // 1. Reject bad input before anything is scheduled
    let email = state
        .community
        .check_password_reset(&req.email)
        .await
        .map_err(form_failure)?;

    // 2. Simulate the mail round-trip on a detached task. It runs once, is
    //    never retried, and finishes even if this request is dropped.
    let community = state.community.clone();
    let delay = state.config.delivery_delay;
    let issuance = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        community.issue_password_reset(&email).await
    });

    // 3. Wait for it to report back
    let request = issuance.await.map_err(|e| {
        error!("Password reset task failed: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Error sending reset email")),
        )
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ForgotPasswordResponse {
            message: "Password reset instructions sent".to_string(),
            token_preview: request.token.chars().take(TOKEN_PREVIEW_CHARS).collect(),
        }),
    ))
}

//! services/api/src/web/router.rs
//!
//! Assembles the HTTP routes, shared by the `api` binary and the integration tests.

use crate::web::{
    auth::{
        forgot_password_handler, session_handler, signin_handler, signout_handler,
        signup_handler,
    },
    newsletter::{daily_reflection_handler, list_subscribers_handler, subscribe_handler},
    rest::ApiDoc,
    state::AppState,
    submissions::{donation_handler, thought_handler},
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Form bodies are small; anything past this is refused.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let newsletter_routes = Router::new()
        .route("/newsletter/subscribe", post(subscribe_handler))
        .route("/newsletter/subscribers", get(list_subscribers_handler))
        .route("/newsletter/daily-reflection", post(daily_reflection_handler));

    let auth_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/signin", post(signin_handler))
        .route("/auth/signout", post(signout_handler))
        .route("/auth/session", get(session_handler))
        .route("/auth/forgot-password", post(forgot_password_handler));

    let submission_routes = Router::new()
        .route("/youth-connect", post(thought_handler))
        .route("/donation", post(donation_handler));

    let api_router = Router::new()
        .merge(newsletter_routes)
        .merge(auth_routes)
        .merge(submission_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

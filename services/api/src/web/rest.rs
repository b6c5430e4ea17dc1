//! services/api/src/web/rest.rs
//!
//! Shared response payloads, the mapping from form errors to HTTP statuses,
//! and the master definition for the OpenAPI specification.

use crate::web::{auth, newsletter, submissions};
use axum::{http::StatusCode, Json};
use community_core::{FormError, SessionRecord};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        newsletter::subscribe_handler,
        newsletter::list_subscribers_handler,
        newsletter::daily_reflection_handler,
        auth::signup_handler,
        auth::signin_handler,
        auth::signout_handler,
        auth::session_handler,
        auth::forgot_password_handler,
        submissions::thought_handler,
        submissions::donation_handler,
    ),
    components(
        schemas(
            MessageResponse,
            SessionResponse,
            newsletter::SubscribeRequest,
            newsletter::SubscribeResponse,
            newsletter::ReflectionResponse,
            auth::SignupRequest,
            auth::SigninRequest,
            auth::ForgotPasswordRequest,
            auth::ForgotPasswordResponse,
            submissions::ThoughtRequest,
            submissions::ThoughtResponse,
            submissions::DonationRequest,
            submissions::DonationResponse,
        )
    ),
    tags(
        (name = "Community Store API", description = "Newsletter, account and submission endpoints backed by the community record store.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Payload Structs
//=========================================================================================

/// A human-readable outcome, used for errors and for bodiless successes.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The signed-in user as exposed over HTTP.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

impl From<SessionRecord> for SessionResponse {
    fn from(s: SessionRecord) -> Self {
        Self {
            id: s.id,
            full_name: s.full_name,
            email: s.email,
        }
    }
}

/// The error half of every handler's result.
pub type Failure = (StatusCode, Json<MessageResponse>);

/// Maps a form error onto its HTTP status and a `{"message": ...}` body.
pub fn form_failure(err: FormError) -> Failure {
    let status = match &err {
        FormError::Validation(_) => StatusCode::BAD_REQUEST,
        FormError::Duplicate(_) => StatusCode::CONFLICT,
        FormError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        FormError::UnknownAccount => StatusCode::NOT_FOUND,
        FormError::UnreadableRecords(_) | FormError::Encoding(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        FormError::RemoteCall(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(MessageResponse::new(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use community_core::{DuplicateKind, PortError, ValidationError};

    #[test]
    fn statuses_follow_the_error_kind() {
        let cases = [
            (FormError::from(ValidationError::InvalidEmail), StatusCode::BAD_REQUEST),
            (FormError::Duplicate(DuplicateKind::Account), StatusCode::CONFLICT),
            (FormError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (FormError::UnknownAccount, StatusCode::NOT_FOUND),
            (
                FormError::UnreadableRecords("userAccounts"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                FormError::RemoteCall(PortError::Unexpected("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(form_failure(err).0, expected);
        }
    }

    #[test]
    fn body_carries_the_user_facing_message() {
        let (_, Json(body)) = form_failure(ValidationError::PasswordTooShort(6).into());
        assert_eq!(body.message, "Password must be at least 6 characters");
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/newsletter/subscribe",
            "/newsletter/subscribers",
            "/newsletter/daily-reflection",
            "/auth/signup",
            "/auth/signin",
            "/auth/signout",
            "/auth/session",
            "/auth/forgot-password",
            "/youth-connect",
            "/donation",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing from ApiDoc");
        }
    }
}

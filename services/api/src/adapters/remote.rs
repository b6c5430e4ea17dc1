//! services/api/src/adapters/remote.rs
//!
//! This module contains the adapter for the optional remote backend that
//! receives thoughts and donations. It implements the
//! `RemoteSubmissionService` port from the `core` crate.

use async_trait::async_trait;
use community_core::domain::{Donation, DonationReceipt, Thought};
use community_core::ports::{PortError, PortResult, RemoteSubmissionService};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Posts JSON to `{base_url}/youth-connect` and `{base_url}/donation`.
#[derive(Clone)]
pub struct HttpRemoteAdapter {
    client: Client,
    base_url: String,
}

impl HttpRemoteAdapter {
    /// Creates a new `HttpRemoteAdapter`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Sends one POST and decodes the JSON answer. A body that is not JSON
    /// reads as `{}`; a non-success status is an error carrying the body's
    /// `message` when it has one.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> PortResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(payload)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("request failed");
            return Err(PortError::Unexpected(format!("{} returned {}: {}", path, status, message)));
        }
        Ok(body)
    }
}

/// The form fields only; the local timestamp is not part of the wire shape.
#[derive(Serialize)]
struct ThoughtPayload<'a> {
    name: &'a str,
    email: &'a str,
    campus: &'a str,
    city: &'a str,
    address: &'a str,
    thought: &'a str,
}

impl<'a> From<&'a Thought> for ThoughtPayload<'a> {
    fn from(t: &'a Thought) -> Self {
        Self {
            name: &t.name,
            email: &t.email,
            campus: &t.campus,
            city: &t.city,
            address: &t.address,
            thought: &t.thought,
        }
    }
}

//=========================================================================================
// `RemoteSubmissionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl RemoteSubmissionService for HttpRemoteAdapter {
    async fn submit_thought(&self, thought: &Thought) -> PortResult<serde_json::Value> {
        self.post_json("/youth-connect", &ThoughtPayload::from(thought))
            .await
    }

    async fn submit_donation(&self, donation: &Donation) -> PortResult<DonationReceipt> {
        let body = self.post_json("/donation", donation).await?;
        serde_json::from_value(body).map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

/// Stands in when no remote endpoint is configured. Every call fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledRemote;

#[async_trait]
impl RemoteSubmissionService for DisabledRemote {
    async fn submit_thought(&self, _thought: &Thought) -> PortResult<serde_json::Value> {
        Err(PortError::Unexpected("no remote endpoint configured".to_string()))
    }

    async fn submit_donation(&self, _donation: &Donation) -> PortResult<DonationReceipt> {
        Err(PortError::Unexpected("no remote endpoint configured".to_string()))
    }
}

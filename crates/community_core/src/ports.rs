//! crates/community_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! The durable key-value store, the password encoding and the optional
//! remote endpoint are all injected through these traits, so the core never
//! reaches for a global and tests can substitute in-memory fakes.

use crate::domain::{Donation, DonationReceipt, Thought};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Storage quota exceeded while writing {0}")]
    QuotaExceeded(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// String-keyed, string-valued persistence that survives restarts.
///
/// There are no transactions and no atomicity across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> PortResult<()>;

    async fn remove(&self, key: &str) -> PortResult<()>;
}

/// Turns a plaintext password into its stored form and checks candidates against it.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, plain: &str) -> PortResult<String>;

    fn matches(&self, plain: &str, encoded: &str) -> bool;
}

/// The optional backend that receives thoughts and donations.
#[async_trait]
pub trait RemoteSubmissionService: Send + Sync {
    /// Relays a thought to `POST /youth-connect`.
    async fn submit_thought(&self, thought: &Thought) -> PortResult<serde_json::Value>;

    /// Relays a donation to `POST /donation`.
    async fn submit_donation(&self, donation: &Donation) -> PortResult<DonationReceipt>;
}

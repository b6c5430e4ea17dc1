//! crates/community_core/src/domain.rs
//!
//! Defines the core records persisted by the community store.
//! Field names are serialized in camelCase so that records written by the
//! website scripts and records written here are interchangeable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A newsletter subscriber is nothing more than the email it subscribed with.
pub type Subscriber = String;

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// `"user_" + milliseconds since the epoch` at creation time.
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// Encoded password, see `ports::PasswordEncoder`.
    #[serde(rename = "password")]
    pub password_encoded: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub city: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub verified: bool,
}

impl Account {
    /// Builds the session copy of this account.
    pub fn to_session(&self) -> SessionRecord {
        SessionRecord {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// The current signed-in user. Holds copies of the account fields, never a
/// live reference, so it can outlive or disagree with the account it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// A credential-recovery token. Stored per email, last request wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetRequest {
    pub token: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// A thought shared through the youth-connect form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    pub name: String,
    pub email: String,
    pub campus: String,
    pub city: String,
    pub address: String,
    pub thought: String,
    pub timestamp: DateTime<Utc>,
}

/// A donation pledge. Never stored locally, only relayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub name: String,
    pub amount: String,
    pub message: String,
}

/// What the remote endpoint answers for an accepted donation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Summary of a simulated daily-reflection send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionDispatch {
    pub timestamp: DateTime<Utc>,
    pub recipient_count: usize,
    pub reflection: String,
}

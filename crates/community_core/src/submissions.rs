//! crates/community_core/src/submissions.rs
//!
//! Thoughts and donations, the two forms that talk to the remote endpoint.
//! Thoughts are kept locally first, so a remote failure does not lose them;
//! donations have no local copy and surface the remote failure.

use crate::community::CommunityStore;
use crate::domain::{Donation, DonationReceipt, Thought};
use crate::error::{FormError, FormResult};
use chrono::Utc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ThoughtForm {
    pub name: String,
    pub email: String,
    pub campus: String,
    pub city: String,
    pub address: String,
    pub thought: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtOutcome {
    pub thought: Thought,
    /// Whether the remote endpoint accepted it too.
    pub relayed: bool,
}

impl CommunityStore {
    /// Stores the thought, then relays it. Never fails.
    ///
    /// When the stored thoughts no longer parse, nothing is written and the
    /// thought is not relayed either.
    pub async fn submit_thought(&self, form: ThoughtForm) -> ThoughtOutcome {
        let thought = Thought {
            name: form.name,
            email: form.email,
            campus: form.campus,
            city: form.city,
            address: form.address,
            thought: form.thought,
            timestamp: Utc::now(),
        };
        if self.thoughts.append(thought.clone()).await.is_err() {
            warn!("Stored thoughts are unreadable; dropping the submission.");
            return ThoughtOutcome {
                thought,
                relayed: false,
            };
        }

        let relayed = match self.remote.submit_thought(&thought).await {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to relay thought, keeping the local copy: {:?}", e);
                false
            }
        };

        info!(relayed, "Thought submitted.");
        ThoughtOutcome { thought, relayed }
    }

    pub async fn donate(&self, donation: Donation) -> FormResult<DonationReceipt> {
        let receipt = self.remote.submit_donation(&donation).await.map_err(|e| {
            error!("Failed to process donation: {:?}", e);
            FormError::RemoteCall(e)
        })?;
        info!(has_payment_url = receipt.payment_url.is_some(), "Donation accepted.");
        Ok(receipt)
    }
}

//! crates/community_core/src/newsletter.rs
//!
//! Newsletter subscription and the simulated daily reflection send.

use crate::community::{CommunityStore, SUBSCRIBERS_KEY};
use crate::domain::{ReflectionDispatch, Subscriber};
use crate::error::{DuplicateKind, FormError, FormResult, ValidationError};
use crate::store::AddError;
use crate::validation::is_valid_email;
use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::info;

pub const REFLECTIONS: &[&str] = &[
    "Stillness is not laziness, but presence and awareness. In a world that demands constant motion, stillness becomes your superpower.",
    "Your confusion is not a roadblock, it's a signpost. Learn to read the messages your uncertainty is sending.",
    "Finding your authentic voice is essential. Stop imitating the world: your unique perspective is what the world is waiting to hear.",
    "Real love is when two whole people choose each other, not two broken pieces trying to feel complete.",
    "Comparison is the thief of joy. Your life isn't less, your perspective is distorted.",
    "Purpose isn't found, it's created. Purpose = Natural talents + World's needs.",
    "Perfection is a prison. Excellence is a practice. Permission to be average is permission to be free.",
    "The best revenge isn't finding someone better, it's becoming your best self.",
];

impl CommunityStore {
    /// Adds `email` to the subscriber list.
    ///
    /// Returns the stored (trimmed) address. An address already on the list is
    /// reported as `Duplicate` and leaves the list untouched.
    pub async fn subscribe(&self, email: &str) -> FormResult<Subscriber> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        self.subscribers
            .add(email.to_string(), |s| s.as_str())
            .await
            .map_err(|e| match e {
                AddError::AlreadyExists => FormError::Duplicate(DuplicateKind::Subscriber),
                AddError::Unreadable => FormError::UnreadableRecords(SUBSCRIBERS_KEY),
            })?;

        let total = self.subscribers.len().await;
        info!(total, "New newsletter subscriber.");
        Ok(email.to_string())
    }

    pub async fn list_subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.load_all().await
    }

    /// Picks today's reflection for every subscriber. `None` when nobody is subscribed.
    pub async fn daily_reflection(&self) -> Option<ReflectionDispatch> {
        let recipient_count = self.subscribers.len().await;
        if recipient_count == 0 {
            info!("No subscribers yet; skipping daily reflection.");
            return None;
        }

        let reflection = REFLECTIONS.choose(&mut rand::thread_rng())?.to_string();
        info!(recipient_count, "Sending daily reflection.");
        Some(ReflectionDispatch {
            timestamp: Utc::now(),
            recipient_count,
            reflection,
        })
    }
}

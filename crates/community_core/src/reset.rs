//! crates/community_core/src/reset.rs
//!
//! Issues password-reset requests. Nothing in this crate consumes them: the
//! token is stored for a later recovery flow and never checked for expiry here.

use crate::domain::ResetRequest;
use crate::store::DurableStore;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

pub const RESET_KEY_PREFIX: &str = "pwReset_";
pub const RESET_TTL_MINUTES: i64 = 30;
const TOKEN_RANDOM_CHARS: usize = 11;

/// Storage key for the reset request belonging to `email`.
pub fn reset_key(email: &str) -> String {
    format!("{RESET_KEY_PREFIX}{email}")
}

/// `reset_<random alphanumerics><millis in base 36>`.
///
/// Uniqueness is probabilistic; the timestamp suffix only narrows collisions
/// to requests issued within the same millisecond.
pub fn generate_token(now_millis: i64) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_RANDOM_CHARS)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("reset_{random}{}", to_base36(now_millis.max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[derive(Clone)]
pub struct ResetStore {
    store: DurableStore,
}

impl ResetStore {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }

    /// Creates a fresh request for `email`, replacing any earlier one.
    pub async fn issue(&self, email: &str) -> ResetRequest {
        let now = Utc::now();
        let request = ResetRequest {
            token: generate_token(now.timestamp_millis()),
            email: email.to_string(),
            timestamp: now,
            expires: now + Duration::minutes(RESET_TTL_MINUTES),
        };
        self.store.set_json(&reset_key(email), &request).await;
        request
    }

    pub async fn get(&self, email: &str) -> Option<ResetRequest> {
        self.store.get_json(&reset_key(email)).await
    }
}

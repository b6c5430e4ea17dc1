//! In-memory fakes for the core's unit tests.

use crate::domain::{Donation, DonationReceipt, Thought};
use crate::ports::{KeyValueStore, PasswordEncoder, PortError, PortResult, RemoteSubmissionService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryKv {
    pub fn failing_writes() -> Self {
        Self {
            entries: Mutex::default(),
            fail_writes: true,
        }
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        if self.fail_writes {
            return Err(PortError::QuotaExceeded(key.to_string()));
        }
        self.put_raw(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        if self.fail_writes {
            return Err(PortError::Unexpected("store unavailable".to_string()));
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A `MemoryKv` that yields to the scheduler on every call, like a networked backend.
#[derive(Default)]
pub struct YieldingKv {
    inner: MemoryKv,
}

#[async_trait]
impl KeyValueStore for YieldingKv {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        tokio::task::yield_now().await;
        self.inner.remove(key).await
    }
}

/// Reverses the password. Enough to tell encoded from plain in assertions.
pub struct ReversingEncoder;

impl PasswordEncoder for ReversingEncoder {
    fn encode(&self, plain: &str) -> PortResult<String> {
        Ok(plain.chars().rev().collect())
    }

    fn matches(&self, plain: &str, encoded: &str) -> bool {
        plain.chars().rev().collect::<String>() == encoded
    }
}

/// Records what it was sent; fails every call when `fail` is set.
#[derive(Default)]
pub struct FakeRemote {
    pub fail: bool,
    pub thoughts: Mutex<Vec<Thought>>,
    pub donations: Mutex<Vec<Donation>>,
}

impl FakeRemote {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RemoteSubmissionService for FakeRemote {
    async fn submit_thought(&self, thought: &Thought) -> PortResult<serde_json::Value> {
        if self.fail {
            return Err(PortError::Unexpected("connection refused".to_string()));
        }
        self.thoughts.lock().unwrap().push(thought.clone());
        Ok(serde_json::json!({ "ok": true }))
    }

    async fn submit_donation(&self, donation: &Donation) -> PortResult<DonationReceipt> {
        if self.fail {
            return Err(PortError::Unexpected("connection refused".to_string()));
        }
        self.donations.lock().unwrap().push(donation.clone());
        Ok(DonationReceipt {
            payment_url: Some("https://pay.example/checkout/1".to_string()),
            message: None,
        })
    }
}

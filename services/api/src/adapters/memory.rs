//! services/api/src/adapters/memory.rs
//!
//! An in-process `KeyValueStore` with a byte quota, used when no database is
//! configured and as the store behind the integration tests.

use async_trait::async_trait;
use community_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Keeps every entry in a `HashMap`. Size is counted as key bytes plus value bytes.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota_bytes: usize,
}

impl MemoryStore {
    pub fn new(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota_bytes,
        }
    }

    pub fn used_bytes(&self) -> PortResult<usize> {
        Ok(Self::size_of(&*self.lock()?))
    }

    fn size_of(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn lock(&self) -> PortResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PortError::Unexpected("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self.lock()?;
        let replaced = entries.get(key).map(|old| key.len() + old.len()).unwrap_or(0);
        let projected = Self::size_of(&entries) - replaced + key.len() + value.len();
        if projected > self.quota_bytes {
            return Err(PortError::QuotaExceeded(key.to_string()));
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

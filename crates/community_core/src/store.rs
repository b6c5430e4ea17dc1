//! crates/community_core/src/store.rs
//!
//! The persistence boundary and the list-backed record collections built on it.

use crate::ports::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

//=========================================================================================
// Durable Store
//=========================================================================================

/// Wraps the injected key-value port and swallows every persistence error.
///
/// A failed read behaves like a missing key and a failed write like a no-op;
/// callers above this type never see a storage failure.
///
/// Clones share one write lock. Holders of [`DurableStore::lock`] run their
/// read-modify-write cycles one at a time.
#[derive(Clone)]
pub struct DurableStore {
    inner: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

/// What a read of a JSON value found.
enum Loaded<T> {
    Missing,
    Malformed,
    Value(T),
}

impl DurableStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Serialises read-modify-write cycles across every clone of this store.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        match self.inner.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from store; treating as absent.");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.inner.set(key, value).await {
            warn!(key, error = %e, "Failed to write to store; continuing without persisting.");
        }
    }

    pub async fn remove(&self, key: &str) {
        if let Err(e) = self.inner.remove(key).await {
            warn!(key, error = %e, "Failed to remove from store.");
        }
    }

    /// Reads and parses a single JSON value; absent or malformed content yields `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.load_json(key).await {
            Loaded::Value(value) => Some(value),
            Loaded::Missing | Loaded::Malformed => None,
        }
    }

    async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Loaded<T> {
        let Some(raw) = self.get(key).await else {
            return Loaded::Missing;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Loaded::Value(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value is not valid JSON; ignoring it.");
                Loaded::Malformed
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw).await,
            Err(e) => warn!(key, error = %e, "Failed to serialize value for store."),
        }
    }
}

//=========================================================================================
// Record Collection
//=========================================================================================

/// Outcome of a successful uniqueness-checked insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added;

/// The stored list could not be parsed, so it was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unreadable;

/// Why [`RecordCollection::add`] refused a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    /// The unique field is already taken.
    AlreadyExists,
    Unreadable,
}

impl From<Unreadable> for AddError {
    fn from(_: Unreadable) -> Self {
        AddError::Unreadable
    }
}

/// An ordered list of records stored as one JSON array under a single key.
///
/// Every mutation rewrites the whole array. Insertion order is kept and
/// nothing is ever reordered or compacted.
pub struct RecordCollection<T> {
    store: DurableStore,
    key: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> RecordCollection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(store: DurableStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _record: PhantomData,
        }
    }

    /// All records in insertion order. Missing or malformed content is an empty list.
    pub async fn load_all(&self) -> Vec<T> {
        self.store.get_json(&self.key).await.unwrap_or_default()
    }

    /// The stored list for a mutation. Malformed content is refused rather
    /// than treated as empty, so it is never overwritten.
    async fn load_for_update(&self) -> Result<Vec<T>, Unreadable> {
        match self.store.load_json(&self.key).await {
            Loaded::Value(records) => Ok(records),
            Loaded::Missing => Ok(Vec::new()),
            Loaded::Malformed => {
                warn!(key = %self.key, "Refusing to overwrite unreadable records.");
                Err(Unreadable)
            }
        }
    }

    /// Appends `record` unless a stored record has the same `unique_by` value.
    ///
    /// The comparison is exact string equality; case is significant.
    pub async fn add<F>(&self, record: T, unique_by: F) -> Result<Added, AddError>
    where
        F: Fn(&T) -> &str,
    {
        let _guard = self.store.lock().await;
        let mut records = self.load_for_update().await?;
        let candidate = unique_by(&record);
        if records.iter().any(|existing| unique_by(existing) == candidate) {
            return Err(AddError::AlreadyExists);
        }
        records.push(record);
        self.store.set_json(&self.key, &records).await;
        Ok(Added)
    }

    /// Appends without any uniqueness check.
    pub async fn append(&self, record: T) -> Result<(), Unreadable> {
        let _guard = self.store.lock().await;
        let mut records = self.load_for_update().await?;
        records.push(record);
        self.store.set_json(&self.key, &records).await;
        Ok(())
    }

    /// First record in insertion order matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.load_all().await.into_iter().find(|r| predicate(r))
    }

    pub async fn contains<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.load_all().await.iter().any(|r| predicate(r))
    }

    pub async fn len(&self) -> usize {
        self.load_all().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//! crates/community_core/src/community.rs
//!
//! `CommunityStore` ties the collections, the session pointer and the
//! injected ports together. The form workflows are implemented on it in
//! `newsletter`, `accounts` and `submissions`.

use crate::domain::{Account, Subscriber, Thought};
use crate::ports::{KeyValueStore, PasswordEncoder, RemoteSubmissionService};
use crate::reset::ResetStore;
use crate::session::SessionPointer;
use crate::store::{DurableStore, RecordCollection};
use std::sync::Arc;

pub const SUBSCRIBERS_KEY: &str = "adhyatambuzz_subscribers";
pub const ACCOUNTS_KEY: &str = "userAccounts";
pub const THOUGHTS_KEY: &str = "youthThoughts";

#[derive(Clone)]
pub struct CommunityStore {
    pub(crate) subscribers: RecordCollection<Subscriber>,
    pub(crate) accounts: RecordCollection<Account>,
    pub(crate) thoughts: RecordCollection<Thought>,
    pub(crate) session: SessionPointer,
    pub(crate) resets: ResetStore,
    pub(crate) encoder: Arc<dyn PasswordEncoder>,
    pub(crate) remote: Arc<dyn RemoteSubmissionService>,
}

impl CommunityStore {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        encoder: Arc<dyn PasswordEncoder>,
        remote: Arc<dyn RemoteSubmissionService>,
    ) -> Self {
        let store = DurableStore::new(kv);
        Self {
            subscribers: RecordCollection::new(store.clone(), SUBSCRIBERS_KEY),
            accounts: RecordCollection::new(store.clone(), ACCOUNTS_KEY),
            thoughts: RecordCollection::new(store.clone(), THOUGHTS_KEY),
            session: SessionPointer::new(store.clone()),
            resets: ResetStore::new(store),
            encoder,
            remote,
        }
    }

    pub fn accounts(&self) -> &RecordCollection<Account> {
        &self.accounts
    }

    pub fn thoughts(&self) -> &RecordCollection<Thought> {
        &self.thoughts
    }

    pub fn session(&self) -> &SessionPointer {
        &self.session
    }

    pub fn resets(&self) -> &ResetStore {
        &self.resets
    }

    /// Looks an account up by its email. Exact match, first in insertion order.
    pub async fn account_by_email(&self, email: &str) -> Option<Account> {
        self.accounts.find(|a| a.email == email).await
    }
}

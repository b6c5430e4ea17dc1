//! crates/community_core/src/session.rs
//!
//! The single "current user" record and the remember-me flag.

use crate::domain::SessionRecord;
use crate::store::DurableStore;

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const REMEMBER_USER_KEY: &str = "rememberUser";

/// Points at whoever signed in last.
///
/// The stored record is a copy; it is not re-checked against the account
/// collection and stays in place until explicitly cleared.
#[derive(Clone)]
pub struct SessionPointer {
    store: DurableStore,
}

impl SessionPointer {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }

    /// Replaces any existing session. Last write wins.
    pub async fn set_current(&self, session: &SessionRecord) {
        self.store.set_json(CURRENT_USER_KEY, session).await;
    }

    pub async fn get_current(&self) -> Option<SessionRecord> {
        self.store.get_json(CURRENT_USER_KEY).await
    }

    pub async fn clear_current(&self) {
        self.store.remove(CURRENT_USER_KEY).await;
    }

    pub async fn remember(&self) {
        self.store.set(REMEMBER_USER_KEY, "true").await;
    }

    pub async fn is_remembered(&self) -> bool {
        self.store.get(REMEMBER_USER_KEY).await.as_deref() == Some("true")
    }

    pub async fn forget(&self) {
        self.store.remove(REMEMBER_USER_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryKv;
    use std::sync::Arc;

    fn record(id: &str, email: &str) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            full_name: "Ann".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn last_write_wins() {
        let kv = Arc::new(MemoryKv::default());
        let sessions = SessionPointer::new(DurableStore::new(kv.clone()));
        assert!(sessions.get_current().await.is_none());

        sessions.set_current(&record("user_1", "a@x.com")).await;
        sessions.set_current(&record("user_2", "b@x.com")).await;

        assert_eq!(sessions.get_current().await, Some(record("user_2", "b@x.com")));
        assert_eq!(
            kv.raw(CURRENT_USER_KEY).as_deref(),
            Some(r#"{"id":"user_2","fullName":"Ann","email":"b@x.com"}"#)
        );
    }

    #[tokio::test]
    async fn clear_removes_the_session() {
        let kv = Arc::new(MemoryKv::default());
        let sessions = SessionPointer::new(DurableStore::new(kv.clone()));
        sessions.set_current(&record("user_1", "a@x.com")).await;

        sessions.clear_current().await;

        assert!(sessions.get_current().await.is_none());
        assert!(kv.raw(CURRENT_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn malformed_session_reads_as_signed_out() {
        let kv = Arc::new(MemoryKv::default());
        kv.put_raw(CURRENT_USER_KEY, "[1,2");
        let sessions = SessionPointer::new(DurableStore::new(kv));

        assert!(sessions.get_current().await.is_none());
    }

    #[tokio::test]
    async fn remember_flag_is_the_literal_true() {
        let kv = Arc::new(MemoryKv::default());
        let sessions = SessionPointer::new(DurableStore::new(kv.clone()));
        assert!(!sessions.is_remembered().await);

        sessions.remember().await;
        assert_eq!(kv.raw(REMEMBER_USER_KEY).as_deref(), Some("true"));
        assert!(sessions.is_remembered().await);

        kv.put_raw(REMEMBER_USER_KEY, "yes");
        assert!(!sessions.is_remembered().await);

        sessions.forget().await;
        assert!(kv.raw(REMEMBER_USER_KEY).is_none());
    }
}

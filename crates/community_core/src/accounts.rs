//! crates/community_core/src/accounts.rs
//!
//! Sign-up, sign-in, sign-out and password recovery.

use crate::community::{CommunityStore, ACCOUNTS_KEY};
use crate::domain::{Account, ResetRequest, SessionRecord};
use crate::error::{DuplicateKind, FormError, FormResult, ValidationError};
use crate::store::AddError;
use crate::validation::{is_valid_email, MIN_PASSWORD_CHARS};
use chrono::Utc;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub campus: String,
    pub city: String,
}

impl SignupForm {
    /// Checks the form in the order the fields appear and returns the
    /// trimmed name and email on success.
    fn validate(&self) -> Result<(&str, &str), ValidationError> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();

        if full_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_CHARS));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok((full_name, email))
    }
}

impl CommunityStore {
    /// Creates an account and signs it in.
    pub async fn sign_up(&self, form: SignupForm) -> FormResult<SessionRecord> {
        let (full_name, email) = form.validate()?;

        if self.accounts.contains(|a| a.email == email).await {
            return Err(FormError::Duplicate(DuplicateKind::Account));
        }

        let password_encoded = self.encoder.encode(&form.password).map_err(|e| {
            error!("Failed to encode password: {:?}", e);
            FormError::Encoding(e)
        })?;

        let now = Utc::now();
        let account = Account {
            id: format!("user_{}", now.timestamp_millis()),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_encoded,
            campus: form.campus.trim().to_string(),
            city: form.city.trim().to_string(),
            created_at: now,
            verified: false,
        };
        let session = account.to_session();

        self.accounts
            .add(account, |a| a.email.as_str())
            .await
            .map_err(|e| match e {
                AddError::AlreadyExists => FormError::Duplicate(DuplicateKind::Account),
                AddError::Unreadable => FormError::UnreadableRecords(ACCOUNTS_KEY),
            })?;
        self.session.set_current(&session).await;

        info!(account_id = %session.id, "Account created.");
        Ok(session)
    }

    /// Signs in the first account whose email and password both match.
    ///
    /// On failure the existing session, if any, is left as it was.
    pub async fn sign_in(&self, email: &str, password: &str, remember: bool) -> FormResult<SessionRecord> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let account = self
            .accounts
            .find(|a| a.email == email && self.encoder.matches(password, &a.password_encoded))
            .await
            .ok_or(FormError::InvalidCredentials)?;

        let session = account.to_session();
        self.session.set_current(&session).await;
        if remember {
            self.session.remember().await;
        }

        info!(account_id = %session.id, remember, "Signed in.");
        Ok(session)
    }

    /// Clears the session and the remember-me flag.
    pub async fn sign_out(&self) {
        self.session.clear_current().await;
        self.session.forget().await;
    }

    pub async fn current_session(&self) -> Option<SessionRecord> {
        self.session.get_current().await
    }

    /// Checks that a reset can be issued for `email` and returns the trimmed address.
    ///
    /// Split from [`CommunityStore::issue_password_reset`] so the host can
    /// report bad input immediately and run the issuance later.
    pub async fn check_password_reset(&self, email: &str) -> FormResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if self.account_by_email(email).await.is_none() {
            return Err(FormError::UnknownAccount);
        }
        Ok(email.to_string())
    }

    /// Stores a new reset request for an already-checked email.
    pub async fn issue_password_reset(&self, email: &str) -> ResetRequest {
        let request = self.resets.issue(email).await;
        info!(email, "Password reset token created.");
        request
    }

    /// Validates and issues in one step.
    pub async fn request_password_reset(&self, email: &str) -> FormResult<ResetRequest> {
        let email = self.check_password_reset(email).await?;
        Ok(self.issue_password_reset(&email).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PasswordEncoder;
    use crate::session::REMEMBER_USER_KEY;
    use crate::testing::{FakeRemote, MemoryKv, ReversingEncoder};
    use std::sync::Arc;

    fn community(kv: &Arc<MemoryKv>) -> CommunityStore {
        CommunityStore::new(
            kv.clone(),
            Arc::new(ReversingEncoder),
            Arc::new(FakeRemote::default()),
        )
    }

    fn ann() -> SignupForm {
        SignupForm {
            full_name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
            ..SignupForm::default()
        }
    }

    fn seeded_account(email: &str, password: &str) -> Account {
        Account {
            id: "user_1".to_string(),
            full_name: "A".to_string(),
            email: email.to_string(),
            password_encoded: ReversingEncoder.encode(password).unwrap(),
            campus: String::new(),
            city: String::new(),
            created_at: Utc::now(),
            verified: false,
        }
    }

    #[tokio::test]
    async fn signup_creates_the_account_and_signs_it_in() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);

        let session = store.sign_up(ann()).await.unwrap();

        let accounts = store.accounts().load_all().await;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].email, "ann@x.com");
        assert_eq!(accounts[0].password_encoded, "fedcba");
        assert!(accounts[0].id.starts_with("user_"));
        assert!(!accounts[0].verified);
        assert_eq!(session.full_name, "Ann");
        assert_eq!(session.email, "ann@x.com");
        assert_eq!(store.current_session().await, Some(session));
    }

    #[tokio::test]
    async fn signup_rejects_an_existing_email() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        store.sign_up(ann()).await.unwrap();

        let again = store.sign_up(ann()).await;

        assert!(matches!(again, Err(FormError::Duplicate(DuplicateKind::Account))));
        assert_eq!(store.accounts().len().await, 1);
    }

    #[tokio::test]
    async fn signup_never_overwrites_unreadable_accounts() {
        let kv = Arc::new(MemoryKv::default());
        let existing = r#"[{"id":"user_1","fullName":"Old","email":"old@x.com","password":"b2xk","createdAt":"1700000000000"}]"#;
        kv.put_raw(ACCOUNTS_KEY, existing);
        let store = community(&kv);

        let result = store.sign_up(ann()).await;

        assert!(matches!(result, Err(FormError::UnreadableRecords(ACCOUNTS_KEY))));
        assert_eq!(kv.raw(ACCOUNTS_KEY).as_deref(), Some(existing));
        assert_eq!(store.current_session().await, None);
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_any_write() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        let form = SignupForm {
            password: "abcde".to_string(),
            confirm_password: "abcde".to_string(),
            ..ann()
        };

        let result = store.sign_up(form).await;

        assert!(matches!(
            result,
            Err(FormError::Validation(ValidationError::PasswordTooShort(6)))
        ));
        assert!(kv.keys().is_empty());
    }

    #[tokio::test]
    async fn signup_validation_runs_in_field_order() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        let cases = [
            (SignupForm { full_name: " ".into(), email: String::new(), ..ann() }, ValidationError::EmptyName),
            (SignupForm { email: String::new(), ..ann() }, ValidationError::EmptyEmail),
            (SignupForm { email: "ann@x".into(), ..ann() }, ValidationError::InvalidEmail),
            (SignupForm { password: String::new(), ..ann() }, ValidationError::EmptyPassword),
            (SignupForm { confirm_password: "abcdeg".into(), ..ann() }, ValidationError::PasswordMismatch),
        ];

        for (form, expected) in cases {
            match store.sign_up(form).await {
                Err(FormError::Validation(got)) => assert_eq!(got, expected),
                other => panic!("expected {expected:?}, got {other:?}"),
            }
        }
        assert!(kv.raw(ACCOUNTS_KEY).is_none());
    }

    #[tokio::test]
    async fn signin_with_the_right_password_sets_the_session() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        kv.put_raw(
            ACCOUNTS_KEY,
            &serde_json::to_string(&vec![seeded_account("a@x.com", "secret")]).unwrap(),
        );

        let session = store.sign_in("a@x.com", "secret", false).await.unwrap();

        assert_eq!(session.email, "a@x.com");
        assert_eq!(session.id, "user_1");
        assert_eq!(store.current_session().await, Some(session));
        assert!(kv.raw(REMEMBER_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn wrong_password_leaves_the_prior_session() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        let prior = store.sign_up(ann()).await.unwrap();
        let mut accounts = store.accounts().load_all().await;
        accounts.push(seeded_account("a@x.com", "secret"));
        kv.put_raw(ACCOUNTS_KEY, &serde_json::to_string(&accounts).unwrap());

        let result = store.sign_in("a@x.com", "wrong", true).await;

        assert!(matches!(result, Err(FormError::InvalidCredentials)));
        assert_eq!(store.current_session().await, Some(prior));
        assert!(kv.raw(REMEMBER_USER_KEY).is_none());
    }

    #[tokio::test]
    async fn remember_and_sign_out() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        store.sign_up(ann()).await.unwrap();
        store.sign_in("ann@x.com", "abcdef", true).await.unwrap();
        assert!(store.session().is_remembered().await);

        store.sign_out().await;

        assert!(store.current_session().await.is_none());
        assert!(!store.session().is_remembered().await);
    }

    #[tokio::test]
    async fn missing_credentials_are_a_validation_error() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);

        assert!(matches!(
            store.sign_in("  ", "x", false).await,
            Err(FormError::Validation(ValidationError::MissingCredentials))
        ));
        assert!(matches!(
            store.sign_in("a@x.com", "", false).await,
            Err(FormError::Validation(ValidationError::MissingCredentials))
        ));
    }

    #[tokio::test]
    async fn session_survives_account_removal() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);
        let session = store.sign_up(ann()).await.unwrap();

        kv.put_raw(ACCOUNTS_KEY, "[]");

        assert_eq!(store.current_session().await, Some(session));
    }

    #[tokio::test]
    async fn password_reset_requires_a_known_account() {
        let kv = Arc::new(MemoryKv::default());
        let store = community(&kv);

        assert!(matches!(
            store.request_password_reset("nobody@x.com").await,
            Err(FormError::UnknownAccount)
        ));
        assert!(matches!(
            store.request_password_reset("nobody").await,
            Err(FormError::Validation(ValidationError::InvalidEmail))
        ));

        store.sign_up(ann()).await.unwrap();
        let first = store.request_password_reset(" ann@x.com ").await.unwrap();
        let second = store.request_password_reset("ann@x.com").await.unwrap();

        assert_eq!(first.email, "ann@x.com");
        let stored = store.resets().get("ann@x.com").await.unwrap();
        assert_eq!(stored.token, second.token);
        assert_eq!(kv.keys().iter().filter(|k| k.starts_with("pwReset_")).count(), 1);
    }
}

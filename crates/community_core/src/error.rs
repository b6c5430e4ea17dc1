//! crates/community_core/src/error.rs
//!
//! Errors reported to the callers of the form workflows.
//! Persistence failures never appear here: they stop at `DurableStore`.
//! The one exception is a stored list that no longer parses, which is
//! reported instead of being overwritten.

use crate::ports::PortError;

/// Input rejected before any store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your full name")]
    EmptyName,
    #[error("Please enter your email address")]
    EmptyEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a password")]
    EmptyPassword,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter email and password")]
    MissingCredentials,
}

/// Which collection already holds the submitted email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DuplicateKind {
    #[error("You are already subscribed")]
    Subscriber,
    #[error("An account with this email already exists")]
    Account,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Duplicate(DuplicateKind),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No account found with this email address")]
    UnknownAccount,

    /// The stored list under `0` does not parse; it was left untouched.
    #[error("Stored records under {0} could not be read")]
    UnreadableRecords(&'static str),

    #[error("Could not encode the password: {0}")]
    Encoding(#[source] PortError),

    /// The remote endpoint failed and there is no local path to fall back on.
    #[error("Remote call failed: {0}")]
    RemoteCall(#[source] PortError),
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

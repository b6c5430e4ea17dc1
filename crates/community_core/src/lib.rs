pub mod accounts;
pub mod community;
pub mod domain;
pub mod error;
pub mod newsletter;
pub mod ports;
pub mod reset;
pub mod session;
pub mod store;
pub mod submissions;
pub mod validation;

#[cfg(test)]
mod testing;

pub use accounts::SignupForm;
pub use community::CommunityStore;
pub use domain::{
    Account, Donation, DonationReceipt, ReflectionDispatch, ResetRequest, SessionRecord,
    Subscriber, Thought,
};
pub use error::{DuplicateKind, FormError, FormResult, ValidationError};
pub use ports::{KeyValueStore, PasswordEncoder, PortError, PortResult, RemoteSubmissionService};
pub use store::{AddError, Added, DurableStore, RecordCollection, Unreadable};
pub use submissions::{ThoughtForm, ThoughtOutcome};
pub use validation::is_valid_email;

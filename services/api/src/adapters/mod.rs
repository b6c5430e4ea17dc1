pub mod db;
pub mod memory;
pub mod password;
pub mod remote;

pub use db::DbAdapter;
pub use memory::MemoryStore;
pub use password::{Argon2Encoder, LegacyBase64Encoder};
pub use remote::{DisabledRemote, HttpRemoteAdapter};

//! services/api/src/adapters/password.rs
//!
//! Implementations of the `PasswordEncoder` port.
//!
//! The website scripts stored passwords as plain base64, which anyone with
//! access to the store can reverse. `LegacyBase64Encoder` reproduces that
//! byte-for-byte for deployments that must keep writing compatible records;
//! `Argon2Encoder` is the default and still accepts legacy records on sign-in.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use community_core::ports::{PasswordEncoder, PortError, PortResult};
use tracing::error;

const PHC_ARGON2_PREFIX: &str = "$argon2";

/// Standard base64 of the Latin-1 bytes, one byte per char. Reversible, not a hash.
///
/// Passwords with a char above U+00FF cannot be encoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyBase64Encoder;

fn latin1_bytes(plain: &str) -> Option<Vec<u8>> {
    plain.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

impl PasswordEncoder for LegacyBase64Encoder {
    fn encode(&self, plain: &str) -> PortResult<String> {
        latin1_bytes(plain)
            .map(|bytes| STANDARD.encode(bytes))
            .ok_or_else(|| {
                PortError::Unexpected("Password contains characters outside Latin-1".to_string())
            })
    }

    fn matches(&self, plain: &str, encoded: &str) -> bool {
        latin1_bytes(plain).is_some_and(|bytes| STANDARD.encode(bytes) == encoded)
    }
}

/// Salted argon2id PHC strings.
#[derive(Clone, Default)]
pub struct Argon2Encoder {
    argon2: Argon2<'static>,
}

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, plain: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PortError::Unexpected(format!("Failed to hash password: {}", e)))
    }

    fn matches(&self, plain: &str, encoded: &str) -> bool {
        if !encoded.starts_with(PHC_ARGON2_PREFIX) {
            return LegacyBase64Encoder.matches(plain, encoded);
        }
        match PasswordHash::new(encoded) {
            Ok(parsed) => self
                .argon2
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                error!("Failed to parse password hash: {:?}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_encoding_is_plain_base64() {
        let encoder = LegacyBase64Encoder;
        assert_eq!(encoder.encode("secret").unwrap(), "c2VjcmV0");
        assert!(encoder.matches("secret", "c2VjcmV0"));
        assert!(!encoder.matches("Secret", "c2VjcmV0"));
    }

    #[test]
    fn legacy_encoding_uses_one_byte_per_latin1_char() {
        let encoder = LegacyBase64Encoder;
        assert_eq!(encoder.encode("pässwort").unwrap(), "cORzc3dvcnQ=");
        assert!(encoder.matches("pässwort", "cORzc3dvcnQ="));
        assert!(!encoder.matches("pässwort", "cMOkc3N3b3J0"));
    }

    #[test]
    fn legacy_encoding_refuses_chars_beyond_latin1() {
        let encoder = LegacyBase64Encoder;
        assert!(matches!(encoder.encode("pass€word"), Err(PortError::Unexpected(_))));
        assert!(!encoder.matches("pass€word", ""));
    }

    #[test]
    fn argon2_accepts_latin1_legacy_records() {
        assert!(Argon2Encoder::default().matches("pässwort", "cORzc3dvcnQ="));
    }

    #[test]
    fn argon2_hashes_are_salted_and_verify() {
        let encoder = Argon2Encoder::default();
        let first = encoder.encode("abcdef").unwrap();
        let second = encoder.encode("abcdef").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(encoder.matches("abcdef", &first));
        assert!(!encoder.matches("abcdeg", &first));
    }

    #[test]
    fn argon2_accepts_legacy_records() {
        let encoder = Argon2Encoder::default();
        assert!(encoder.matches("secret", "c2VjcmV0"));
        assert!(!encoder.matches("wrong", "c2VjcmV0"));
        assert!(!encoder.matches("secret", "$argon2id$garbage"));
    }
}

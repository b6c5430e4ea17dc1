//! crates/community_core/src/validation.rs
//!
//! Input checks shared by the forms.

use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_CHARS: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Accepts `local@domain.tld` where no part contains whitespace or `@`.
///
/// Deliberately loose: `a@b.c` and `a@b.c.d` pass, quoted local parts and
/// IP-literal domains are not understood.
pub fn is_valid_email(s: &str) -> bool {
    email_pattern().is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_permissive_shape() {
        for ok in ["a@b.c", "ann@x.com", "first.last+tag@sub.domain.org", "é@ü.ñ", "a@b..c"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_missing_parts_and_whitespace() {
        for bad in [
            "",
            "plain",
            "a@b",
            "@b.c",
            "a@.c",
            "a@b.",
            "a b@c.d",
            "a@@b.c",
            "a@b.c ",
            " a@b.c",
            "a@b@c.d",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }
}

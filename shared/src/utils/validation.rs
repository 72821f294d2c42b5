//! Email address shape validation
//!
//! Syntax-only checks: a well-shaped address is not necessarily a
//! deliverable one. Existence checks belong to the verification-token
//! flow, not here.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

// Anchored email shape: local part 2-64 chars, domain 2-257 chars
// including the TLD (itself 2-64 chars). Whitespace never matches any
// of the classes, so an address with embedded or leading blanks is
// rejected outright.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"(?i)^[a-zA-Z0-9][\w.]{1,63}@[\w\-.]{2,256}\.[a-zA-Z0-9]{2,64}$")
        .size_limit(64 * 1024 * 1024)
        .build()
        .unwrap()
});

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for display (e.g. `s****e@domain.com`)
///
/// Also fed raw, possibly invalid input on validation-error paths, so
/// it must never assume a well-formed or ASCII-only address.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() >= 2 => {
            let first = local.chars().next().unwrap();
            let last = local.chars().last().unwrap();
            format!("{}****{}@{}", first, last, domain)
        }
        _ => "****".to_string(),
    }
}

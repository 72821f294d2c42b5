//! Password service implementation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DomainResult, PasswordError};

use super::config::PasswordPolicy;

// bcrypt modular-crypt shape: $2a$/$2b$/$2x$/$2y$, two-digit cost,
// 53 chars of salt+digest in bcrypt's base64 alphabet
static BCRYPT_HASH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$2[abxy]\$\d{2}\$[./A-Za-z0-9]{53}$").unwrap()
});

/// Service for hashing and verifying credential secrets
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    policy: PasswordPolicy,
}

impl PasswordService {
    /// Create a password service with the given policy
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// The active complexity policy
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hash a plaintext secret
    ///
    /// The output is salted and self-describing: `is_hashed` recognizes
    /// it without needing the original secret.
    pub fn hash(&self, secret: &str) -> DomainResult<String> {
        let hashed = bcrypt::hash(secret, self.policy.hash_cost)
            .map_err(|e| PasswordError::Hashing { message: e.to_string() })?;
        Ok(hashed)
    }

    /// Whether a string is already in hashed form
    pub fn is_hashed(candidate: &str) -> bool {
        BCRYPT_HASH_REGEX.is_match(candidate)
    }

    /// Check a plaintext secret against the complexity policy
    ///
    /// An already-hashed input is caller misuse and fails outright; a
    /// well-formed-but-weak secret returns `Ok(false)`.
    pub fn validate_complexity(&self, secret: &str) -> DomainResult<bool> {
        if Self::is_hashed(secret) {
            return Err(PasswordError::AlreadyHashed.into());
        }

        let policy = &self.policy;
        let length = secret.chars().count();
        if length < policy.min_length || length > policy.max_length {
            return Ok(false);
        }
        if policy.require_uppercase && !secret.chars().any(|c| c.is_uppercase()) {
            return Ok(false);
        }
        if policy.require_lowercase && !secret.chars().any(|c| c.is_lowercase()) {
            return Ok(false);
        }
        if policy.require_digit_or_symbol
            && !secret.chars().any(|c| c.is_ascii_digit() || !c.is_alphanumeric())
        {
            return Ok(false);
        }
        Ok(true)
    }

    /// Verify a candidate secret against a stored hash
    ///
    /// A hashed candidate is caller misuse, not a near-miss: comparing
    /// hash against hash would never match and hides the bug upstream.
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> DomainResult<bool> {
        if Self::is_hashed(candidate) {
            return Err(PasswordError::HashedCandidate.into());
        }

        let matched = bcrypt::verify(candidate, stored_hash)
            .map_err(|e| PasswordError::Hashing { message: e.to_string() })?;
        if matched {
            Ok(true)
        } else {
            Err(PasswordError::Mismatch.into())
        }
    }
}

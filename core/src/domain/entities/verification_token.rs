//! Verification token entity for contact-ownership confirmation.
//!
//! A token is a single-use, time-bounded secret pair bound to one
//! account and one contact channel: a short human-typeable code for
//! manual entry and an independent high-entropy opaque string for
//! link-based verification. Knowledge of one secret reveals nothing
//! about the other.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the short code in hex characters
pub const SHORT_CODE_LENGTH: usize = 4;

/// Number of random bytes behind the opaque token
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Maximum number of failed short-code attempts before lockout
pub const MAX_FAILED_ATTEMPTS: i32 = 3;

/// Default validity window for issued tokens (1 hour)
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Contact medium a token is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationChannel {
    Email,
    Phone,
}

impl fmt::Display for VerificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationChannel::Email => write!(f, "email"),
            VerificationChannel::Phone => write!(f, "phone"),
        }
    }
}

/// Verification token entity
///
/// Tokens are superseded, never deleted: history is retained and the
/// lifecycle manager guarantees at most one non-deactivated,
/// non-expired token per (account, channel) lane. Deactivation is
/// terminal for a token instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Unique identifier for the token
    pub id: Uuid,

    /// Owning account
    pub account_id: Uuid,

    /// Contact channel this token verifies
    pub channel: VerificationChannel,

    /// Short human-typeable code (hex, fixed width)
    pub short_code: String,

    /// High-entropy URL-safe string for link-based verification
    pub opaque_token: String,

    /// Timestamp when the token was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful validation
    pub last_used_at: Option<DateTime<Utc>>,

    /// Number of failed short-code attempts
    pub failed_attempts: i32,

    /// Whether the token has been locked out (terminal)
    pub deactivated: bool,
}

impl VerificationToken {
    /// Creates a new token valid for `ttl_minutes` from `issued_at`
    pub fn new(
        account_id: Uuid,
        channel: VerificationChannel,
        short_code: String,
        opaque_token: String,
        issued_at: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            channel,
            short_code,
            opaque_token,
            issued_at,
            expires_at: issued_at + Duration::minutes(ttl_minutes),
            last_used_at: None,
            failed_attempts: 0,
            deactivated: false,
        }
    }

    /// Whether the validity window has passed
    ///
    /// The boundary instant itself still validates; only `now` strictly
    /// after `expires_at` is expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether this token still blocks issuance on its lane
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.deactivated && !self.is_expired(now)
    }

    /// Whether the guess budget is spent
    pub fn attempts_exhausted(&self, max_failed_attempts: i32) -> bool {
        self.failed_attempts >= max_failed_attempts
    }

    /// Record a failed attempt; locks the token out once the counter
    /// passes the budget. Returns whether the token is now deactivated.
    pub fn record_failure(&mut self, max_failed_attempts: i32) -> bool {
        self.failed_attempts += 1;
        if self.failed_attempts > max_failed_attempts {
            self.deactivated = true;
        }
        self.deactivated
    }

    /// Stamp a successful validation
    pub fn mark_used(&mut self, now: DateTime<Utc>) {
        self.last_used_at = Some(now);
    }

    /// Constant-time comparison of a candidate against the short code
    pub fn matches_code(&self, candidate: &str) -> bool {
        constant_time_eq(self.short_code.as_bytes(), candidate.as_bytes())
    }

    /// Remaining failed attempts before lockout
    pub fn remaining_attempts(&self, max_failed_attempts: i32) -> i32 {
        (max_failed_attempts - self.failed_attempts).max(0)
    }
}

//! Configuration for the token lifecycle service

use crate::domain::entities::verification_token::{DEFAULT_TTL_MINUTES, MAX_FAILED_ATTEMPTS};

/// Configuration for the token lifecycle service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Number of minutes before an issued token expires
    pub ttl_minutes: i64,
    /// Failed short-code attempts tolerated before lockout
    pub max_failed_attempts: i32,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: DEFAULT_TTL_MINUTES,
            max_failed_attempts: MAX_FAILED_ATTEMPTS,
        }
    }
}

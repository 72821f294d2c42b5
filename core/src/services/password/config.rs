//! Configuration for the password service

/// Complexity policy applied to plaintext secrets
///
/// Defaults: length 6-31, at least one uppercase letter, one lowercase
/// letter, and one digit or symbol.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum secret length in characters
    pub min_length: usize,
    /// Maximum secret length in characters
    pub max_length: usize,
    /// Require at least one uppercase letter
    pub require_uppercase: bool,
    /// Require at least one lowercase letter
    pub require_lowercase: bool,
    /// Require at least one digit or non-alphanumeric symbol
    pub require_digit_or_symbol: bool,
    /// bcrypt work factor
    pub hash_cost: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 31,
            require_uppercase: true,
            require_lowercase: true,
            require_digit_or_symbol: true,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

//! Domain entities representing core business objects.

pub mod account;
pub mod verification_token;

// Re-export commonly used types
pub use account::{derive_state, Account, AccountState};
pub use verification_token::{
    VerificationChannel, VerificationToken, DEFAULT_TTL_MINUTES, MAX_FAILED_ATTEMPTS,
    OPAQUE_TOKEN_BYTES, SHORT_CODE_LENGTH,
};

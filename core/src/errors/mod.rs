//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AccountError, ContactError, PasswordError, TokenError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Caller-visible failure classes
///
/// Every domain error maps onto exactly one kind. The library never
/// retries internally; callers branch on the kind to decide what to do
/// next (re-prompt, re-request a token, surface a fault).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input arrived with the wrong runtime type
    TypeMismatch,
    /// Input was well-typed but malformed or out of policy
    ValueInvalid,
    /// A presented secret did not match
    AuthenticationFailed,
    /// Missing principals or locked-out tokens
    SecurityViolation,
    /// A token's validity window has passed
    Timeout,
    /// A lifecycle invariant would be broken
    InvariantViolation,
    /// Infrastructure fault (hashing backend, storage port)
    Internal,
}

impl DomainError {
    /// Classify this error into its caller-visible kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Account(e) => e.kind(),
            DomainError::Contact(e) => e.kind(),
            DomainError::Password(e) => e.kind(),
            DomainError::Token(e) => e.kind(),
        }
    }

    /// String error code for transport layers
    pub fn code(&self) -> &'static str {
        use ak_shared::errors::error_codes;
        match self.kind() {
            ErrorKind::TypeMismatch => error_codes::TYPE_MISMATCH,
            ErrorKind::ValueInvalid => error_codes::VALUE_INVALID,
            ErrorKind::AuthenticationFailed => error_codes::AUTHENTICATION_FAILED,
            ErrorKind::SecurityViolation => error_codes::SECURITY_VIOLATION,
            ErrorKind::Timeout => error_codes::TIMEOUT,
            ErrorKind::InvariantViolation => error_codes::INVARIANT_VIOLATION,
            ErrorKind::Internal => error_codes::INTERNAL_ERROR,
        }
    }
}

impl ak_shared::errors::IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ak_shared::errors::ErrorResponse {
        ak_shared::errors::ErrorResponse::new(self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_token::VerificationChannel;

    #[test]
    fn test_kind_classification() {
        let cases: Vec<(DomainError, ErrorKind)> = vec![
            (ContactError::NotText { found: "number".into() }.into(), ErrorKind::TypeMismatch),
            (ContactError::InvalidEmail { email: "x".into() }.into(), ErrorKind::ValueInvalid),
            (ContactError::InvalidPhone { phone: "****".into() }.into(), ErrorKind::ValueInvalid),
            (PasswordError::AlreadyHashed.into(), ErrorKind::ValueInvalid),
            (PasswordError::HashedCandidate.into(), ErrorKind::AuthenticationFailed),
            (PasswordError::Mismatch.into(), ErrorKind::AuthenticationFailed),
            (TokenError::Mismatch.into(), ErrorKind::AuthenticationFailed),
            (TokenError::NotFound.into(), ErrorKind::SecurityViolation),
            (TokenError::Deactivated.into(), ErrorKind::SecurityViolation),
            (TokenError::UnknownAccount.into(), ErrorKind::SecurityViolation),
            (AccountError::NotFound.into(), ErrorKind::SecurityViolation),
            (TokenError::Expired.into(), ErrorKind::Timeout),
            (TokenError::ActiveTokenExists.into(), ErrorKind::InvariantViolation),
            (
                TokenError::ContactNotRegistered { channel: VerificationChannel::Phone }.into(),
                ErrorKind::InvariantViolation,
            ),
            (AccountError::MissingField { field: "first_name".into() }.into(), ErrorKind::ValueInvalid),
            (DomainError::Internal { message: "boom".into() }, ErrorKind::Internal),
        ];

        for (error, expected) in cases {
            assert_eq!(error.kind(), expected, "wrong kind for {error}");
        }
    }

    #[test]
    fn test_code_mapping() {
        let err: DomainError = TokenError::Expired.into();
        assert_eq!(err.code(), "TIMEOUT");
        let err: DomainError = TokenError::ActiveTokenExists.into();
        assert_eq!(err.code(), "INVARIANT_VIOLATION");
    }
}

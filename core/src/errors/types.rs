//! Domain-specific error types for accounts, credentials and
//! verification tokens
//!
//! Message wording for token errors follows the operational contract:
//! a deactivated token reports the same way whether it was locked out
//! years ago or by the failing attempt itself.

use thiserror::Error;

use super::ErrorKind;
use crate::domain::entities::verification_token::VerificationChannel;

/// Account lifecycle and registration errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account does not exist")]
    NotFound,

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Entered password is not valid")]
    WeakPassword,

    #[error("Duplicate value for unique field: {field}")]
    DuplicateContact { field: String },
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::NotFound => ErrorKind::SecurityViolation,
            AccountError::MissingField { .. }
            | AccountError::WeakPassword
            | AccountError::DuplicateContact { .. } => ErrorKind::ValueInvalid,
        }
    }
}

/// Contact-shape validation errors
///
/// Values carried in messages are pre-masked by the validators; raw
/// contact data never reaches log output through an error display.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Contact value must be textual, got: {found}")]
    NotText { found: String },

    #[error("Email input is not valid: {email}")]
    InvalidEmail { email: String },

    #[error("Phone input is not valid: {phone}")]
    InvalidPhone { phone: String },
}

impl ContactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::NotText { .. } => ErrorKind::TypeMismatch,
            ContactError::InvalidEmail { .. } | ContactError::InvalidPhone { .. } => {
                ErrorKind::ValueInvalid
            }
        }
    }
}

/// Credential hashing and verification errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password is already hashed")]
    AlreadyHashed,

    #[error("Entered password is hashed")]
    HashedCandidate,

    #[error("Entered password is wrong")]
    Mismatch,

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },
}

impl PasswordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PasswordError::AlreadyHashed => ErrorKind::ValueInvalid,
            PasswordError::HashedCandidate | PasswordError::Mismatch => {
                ErrorKind::AuthenticationFailed
            }
            PasswordError::Hashing { .. } => ErrorKind::Internal,
        }
    }
}

/// Verification-token lifecycle errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Account does not exist")]
    UnknownAccount,

    #[error("Account has no {channel} contact registered")]
    ContactNotRegistered { channel: VerificationChannel },

    #[error("A valid token already exists")]
    ActiveTokenExists,

    #[error("No token found")]
    NotFound,

    #[error("Token is deactivated")]
    Deactivated,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not valid")]
    Mismatch,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::UnknownAccount
            | TokenError::NotFound
            | TokenError::Deactivated => ErrorKind::SecurityViolation,
            TokenError::ContactNotRegistered { .. } | TokenError::ActiveTokenExists => {
                ErrorKind::InvariantViolation
            }
            TokenError::Expired => ErrorKind::Timeout,
            TokenError::Mismatch => ErrorKind::AuthenticationFailed,
        }
    }
}

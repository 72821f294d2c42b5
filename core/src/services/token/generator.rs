//! Secret generation port for verification tokens

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::domain::entities::verification_token::{OPAQUE_TOKEN_BYTES, SHORT_CODE_LENGTH};

/// Source of the two token secrets
///
/// The short code and the opaque token must be independent: knowledge
/// of one reveals nothing about the other.
pub trait TokenGenerator: Send + Sync {
    /// Fixed-width human-typeable code
    fn short_code(&self) -> String;

    /// High-entropy URL-safe link token
    fn opaque_token(&self) -> String;
}

/// CSPRNG-backed generator used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureTokenGenerator;

impl TokenGenerator for SecureTokenGenerator {
    fn short_code(&self) -> String {
        let mut bytes = [0u8; SHORT_CODE_LENGTH / 2];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    fn opaque_token(&self) -> String {
        let mut bytes = [0u8; OPAQUE_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

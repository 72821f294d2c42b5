//! In-memory implementation of TokenRepository for tests

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::{VerificationChannel, VerificationToken};
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// Mock token repository backed by an append-only vector
pub struct MockTokenRepository {
    tokens: Arc<RwLock<Vec<VerificationToken>>>,
}

impl MockTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of stored tokens, history included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        tokens.push(token.clone());
        Ok(token)
    }

    async fn update(&self, token: &VerificationToken) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;

        match tokens.iter_mut().find(|t| t.id == token.id) {
            Some(stored) => {
                *stored = token.clone();
                Ok(())
            }
            None => Err(TokenError::NotFound.into()),
        }
    }

    async fn find_latest(
        &self,
        account_id: Uuid,
        channel: Option<VerificationChannel>,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;

        let mut latest: Option<&VerificationToken> = None;
        for token in tokens.iter() {
            if token.account_id != account_id {
                continue;
            }
            if let Some(channel) = channel {
                if token.channel != channel {
                    continue;
                }
            }
            // >= so insertion order breaks issued_at ties toward the newest
            if latest.map_or(true, |best| token.issued_at >= best.issued_at) {
                latest = Some(token);
            }
        }

        Ok(latest.cloned())
    }

    async fn find_by_opaque(
        &self,
        opaque: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.iter().find(|t| t.opaque_token == opaque).cloned())
    }
}

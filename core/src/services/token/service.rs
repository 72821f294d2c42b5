//! Token lifecycle service implementation

use std::sync::Arc;

use uuid::Uuid;

use ak_shared::utils::{phone, validation};

use crate::clock::Clock;
use crate::domain::entities::verification_token::{VerificationChannel, VerificationToken};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::{AccountRepository, TokenRepository};

use super::config::TokenServiceConfig;
use super::generator::TokenGenerator;
use super::locks::AccountLocks;

/// Lifecycle manager for verification tokens
///
/// Sole mutator of token rows: issues tokens under the
/// single-active-token guarantee, validates short codes with bounded
/// guess attempts, validates opaque link tokens, and classifies every
/// failure for the caller. All operations for one account are
/// serialized; different accounts proceed in parallel.
pub struct TokenService<A, T, C, G>
where
    A: AccountRepository,
    T: TokenRepository,
    C: Clock,
    G: TokenGenerator,
{
    /// Account lookup port
    accounts: Arc<A>,
    /// Token persistence port
    tokens: Arc<T>,
    /// Time source for issuance and expiry decisions
    clock: Arc<C>,
    /// Secret source for short codes and opaque tokens
    generator: Arc<G>,
    /// Per-account critical sections
    locks: AccountLocks,
    /// Service configuration
    config: TokenServiceConfig,
}

impl<A, T, C, G> TokenService<A, T, C, G>
where
    A: AccountRepository,
    T: TokenRepository,
    C: Clock,
    G: TokenGenerator,
{
    /// Create a new token lifecycle service
    pub fn new(
        accounts: Arc<A>,
        tokens: Arc<T>,
        clock: Arc<C>,
        generator: Arc<G>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            accounts,
            tokens,
            clock,
            generator,
            locks: AccountLocks::new(),
            config,
        }
    }

    /// Issue a fresh token for an account's channel
    ///
    /// Fails when the account is missing, when the account has no
    /// contact registered for the channel, or when a non-deactivated,
    /// non-expired token already exists on the lane. Does not dispatch
    /// anything: delivery belongs to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationToken)` - The persisted token
    /// * `Err(DomainError)` - Classified issuance failure
    pub async fn issue(
        &self,
        account_id: Uuid,
        channel: VerificationChannel,
    ) -> DomainResult<VerificationToken> {
        let _guard = self.locks.acquire(account_id).await;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(TokenError::UnknownAccount)?;

        let contact = account
            .contact(channel)
            .ok_or(TokenError::ContactNotRegistered { channel })?;

        let now = self.clock.now();
        if let Some(last) = self.tokens.find_latest(account_id, Some(channel)).await? {
            if last.is_active(now) {
                tracing::warn!(
                    account_id = %account_id,
                    channel = %channel,
                    event = "token_issue_blocked",
                    "A valid token already exists on this lane"
                );
                return Err(TokenError::ActiveTokenExists.into());
            }
        }

        let token = VerificationToken::new(
            account_id,
            channel,
            self.generator.short_code(),
            self.generator.opaque_token(),
            now,
            self.config.ttl_minutes,
        );
        let token = self.tokens.insert(token).await?;

        tracing::info!(
            account_id = %account_id,
            channel = %channel,
            contact = %mask_contact(channel, contact),
            token_id = %token.id,
            event = "token_issued",
            "Issued verification token"
        );

        Ok(token)
    }

    /// Validate a short code presented for an account
    ///
    /// Without a channel the most recently issued token across channels
    /// is the one checked ("most recent wins"). Checks run in a fixed
    /// order: existence, lockout, expiry, guess budget, then the
    /// constant-time code comparison. A failed attempt always counts,
    /// and the attempt that exhausts the budget locks the token out
    /// even when the code itself was right.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationChannel)` - The channel the token verified
    /// * `Err(DomainError)` - Classified validation failure
    pub async fn validate_short_code(
        &self,
        account_id: Uuid,
        code: &str,
        channel: Option<VerificationChannel>,
    ) -> DomainResult<VerificationChannel> {
        let _guard = self.locks.acquire(account_id).await;

        let mut token = self
            .tokens
            .find_latest(account_id, channel)
            .await?
            .ok_or(TokenError::NotFound)?;

        if token.deactivated {
            return Err(TokenError::Deactivated.into());
        }

        let now = self.clock.now();
        if token.is_expired(now) {
            return Err(TokenError::Expired.into());
        }

        if token.attempts_exhausted(self.config.max_failed_attempts) {
            // the over-budget attempt still counts and seals the lockout
            token.record_failure(self.config.max_failed_attempts);
            self.tokens.update(&token).await?;
            tracing::warn!(
                account_id = %account_id,
                token_id = %token.id,
                failed_attempts = token.failed_attempts,
                event = "token_locked_out",
                "Verification token locked out"
            );
            return Err(TokenError::Deactivated.into());
        }

        if token.matches_code(code) {
            token.mark_used(now);
            self.tokens.update(&token).await?;
            tracing::info!(
                account_id = %account_id,
                channel = %token.channel,
                token_id = %token.id,
                event = "short_code_verified",
                "Short code accepted"
            );
            return Ok(token.channel);
        }

        let deactivated = token.record_failure(self.config.max_failed_attempts);
        self.tokens.update(&token).await?;
        if deactivated {
            tracing::warn!(
                account_id = %account_id,
                token_id = %token.id,
                failed_attempts = token.failed_attempts,
                event = "token_locked_out",
                "Verification token locked out"
            );
            Err(TokenError::Deactivated.into())
        } else {
            Err(TokenError::Mismatch.into())
        }
    }

    /// Validate an opaque link token by exact value
    ///
    /// Success stamps `last_used_at` but does not consume the token; it
    /// stays valid until expiry or deactivation through the short-code
    /// failure path.
    ///
    /// # Returns
    ///
    /// * `Ok((Uuid, VerificationChannel))` - Owning account and channel
    /// * `Err(DomainError)` - Classified validation failure
    pub async fn validate_opaque_token(
        &self,
        opaque: &str,
    ) -> DomainResult<(Uuid, VerificationChannel)> {
        // unlocked probe to learn the owning account, re-read under its lock
        let probe = self
            .tokens
            .find_by_opaque(opaque)
            .await?
            .ok_or(TokenError::Mismatch)?;

        let _guard = self.locks.acquire(probe.account_id).await;

        let mut token = self
            .tokens
            .find_by_opaque(opaque)
            .await?
            .ok_or(TokenError::Mismatch)?;

        if token.deactivated {
            return Err(TokenError::Deactivated.into());
        }

        let now = self.clock.now();
        if token.is_expired(now) {
            return Err(TokenError::Expired.into());
        }

        token.mark_used(now);
        self.tokens.update(&token).await?;

        tracing::info!(
            account_id = %token.account_id,
            channel = %token.channel,
            token_id = %token.id,
            event = "opaque_token_verified",
            "Opaque token accepted"
        );

        Ok((token.account_id, token.channel))
    }
}

fn mask_contact(channel: VerificationChannel, contact: &str) -> String {
    match channel {
        VerificationChannel::Email => validation::mask_email(contact),
        VerificationChannel::Phone => phone::mask_phone(contact),
    }
}

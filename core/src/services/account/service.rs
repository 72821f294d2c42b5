//! Account service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::account::Account;
use crate::domain::entities::verification_token::{VerificationChannel, VerificationToken};
use crate::domain::value_objects::AccountView;
use crate::errors::{AccountError, DomainResult};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::contact::{validate_email, validate_phone};
use crate::services::password::PasswordService;
use crate::services::token::{TokenGenerator, TokenService};

/// Registration payload
///
/// The secret arrives in plaintext and leaves this type only as a hash.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

/// Service for managing account registration and verification flows
pub struct AccountService<A, T, C, G>
where
    A: AccountRepository,
    T: TokenRepository,
    C: Clock,
    G: TokenGenerator,
{
    /// Account persistence port
    accounts: Arc<A>,
    /// Token lifecycle manager
    tokens: Arc<TokenService<A, T, C, G>>,
    /// Credential hashing and policy
    passwords: PasswordService,
    /// Time source for entity stamps
    clock: Arc<C>,
}

impl<A, T, C, G> AccountService<A, T, C, G>
where
    A: AccountRepository,
    T: TokenRepository,
    C: Clock,
    G: TokenGenerator,
{
    /// Create a new account service
    pub fn new(
        accounts: Arc<A>,
        tokens: Arc<TokenService<A, T, C, G>>,
        passwords: PasswordService,
        clock: Arc<C>,
    ) -> Self {
        Self { accounts, tokens, passwords, clock }
    }

    /// Register a new account
    ///
    /// Names and a password are required; contacts are optional but
    /// must be well-shaped when present. The secret is hashed before
    /// anything is persisted.
    pub async fn register(&self, new_account: NewAccount) -> DomainResult<AccountView> {
        let first_name = required(new_account.first_name, "first_name")?;
        let last_name = required(new_account.last_name, "last_name")?;
        if new_account.password.is_empty() {
            return Err(AccountError::MissingField { field: "password".to_string() }.into());
        }
        if !self.passwords.validate_complexity(&new_account.password)? {
            return Err(AccountError::WeakPassword.into());
        }
        if let Some(email) = new_account.email.as_deref() {
            validate_email(email)?;
        }
        if let Some(phone) = new_account.phone.as_deref() {
            validate_phone(phone)?;
        }

        let credential_hash = self.passwords.hash(&new_account.password)?;
        let account = Account::new(
            Some(first_name),
            Some(last_name),
            new_account.email,
            new_account.phone,
            credential_hash,
            self.clock.now(),
        );
        let account = self.accounts.insert(account).await?;

        tracing::info!(
            account_id = %account.id,
            state = ?account.state,
            event = "account_registered",
            "Registered new account"
        );

        Ok(AccountView::from(account))
    }

    /// Look up an account by id
    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<AccountView> {
        let account = self.accounts.find_by_id(id).await?.ok_or(AccountError::NotFound)?;
        Ok(AccountView::from(&account))
    }

    /// Look up an account by email address
    ///
    /// The address shape is validated before the lookup runs.
    pub async fn find_by_email(&self, email: &str) -> DomainResult<AccountView> {
        validate_email(email)?;
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;
        Ok(AccountView::from(&account))
    }

    /// Issue a verification token for one of the account's contacts
    ///
    /// The returned token is handed to a delivery transport by the
    /// caller; nothing is dispatched here.
    pub async fn request_verification(
        &self,
        account_id: Uuid,
        channel: VerificationChannel,
    ) -> DomainResult<VerificationToken> {
        self.tokens.issue(account_id, channel).await
    }

    /// Confirm contact ownership with a short code
    pub async fn confirm_with_code(
        &self,
        account_id: Uuid,
        code: &str,
        channel: Option<VerificationChannel>,
    ) -> DomainResult<AccountView> {
        let verified = self.tokens.validate_short_code(account_id, code, channel).await?;
        self.apply_verification(account_id, verified).await
    }

    /// Confirm contact ownership with an opaque link token
    pub async fn confirm_with_link(&self, opaque: &str) -> DomainResult<AccountView> {
        let (account_id, verified) = self.tokens.validate_opaque_token(opaque).await?;
        self.apply_verification(account_id, verified).await
    }

    /// Change the credential after verifying the current secret
    pub async fn change_password(
        &self,
        account_id: Uuid,
        current_secret: &str,
        new_secret: &str,
    ) -> DomainResult<()> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::NotFound)?;

        self.passwords.verify(&account.credential_hash, current_secret)?;
        self.set_credential(&mut account, new_secret).await?;

        tracing::info!(
            account_id = %account_id,
            event = "password_changed",
            "Credential changed"
        );
        Ok(())
    }

    /// Reset the credential with a link-token authorization
    ///
    /// The opaque token proves contact ownership; no current secret is
    /// needed.
    pub async fn reset_password_with_link(
        &self,
        opaque: &str,
        new_secret: &str,
    ) -> DomainResult<()> {
        let (account_id, _) = self.tokens.validate_opaque_token(opaque).await?;

        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::NotFound)?;
        self.set_credential(&mut account, new_secret).await?;

        tracing::info!(
            account_id = %account_id,
            event = "password_reset",
            "Credential reset via link token"
        );
        Ok(())
    }

    async fn apply_verification(
        &self,
        account_id: Uuid,
        channel: VerificationChannel,
    ) -> DomainResult<AccountView> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::NotFound)?;

        account.mark_contact_verified(channel, self.clock.now());
        self.accounts.update(&account).await?;

        tracing::info!(
            account_id = %account_id,
            channel = %channel,
            state = ?account.state,
            event = "contact_verified",
            "Contact verified"
        );

        Ok(AccountView::from(account))
    }

    async fn set_credential(&self, account: &mut Account, new_secret: &str) -> DomainResult<()> {
        if !self.passwords.validate_complexity(new_secret)? {
            return Err(AccountError::WeakPassword.into());
        }
        let hash = self.passwords.hash(new_secret)?;
        account.set_credential_hash(hash, self.clock.now());
        self.accounts.update(account).await
    }
}

fn required(value: Option<String>, field: &str) -> DomainResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AccountError::MissingField { field: field.to_string() }.into()),
    }
}

//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Implementations must keep `email` and `phone` unique across accounts
/// and reject inserts or updates that would break that.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with the given id
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its email address
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate contact value)
    async fn insert(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist changes to an existing account
    async fn update(&self, account: &Account) -> Result<(), DomainError>;
}

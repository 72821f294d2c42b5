//! In-memory implementation of AccountRepository for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AccountError, DomainError};

use super::r#trait::AccountRepository;

/// Mock account repository backed by a hash map
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        // Unique contact enforcement
        for existing in accounts.values() {
            if account.email.is_some() && existing.email == account.email {
                return Err(AccountError::DuplicateContact { field: "email".to_string() }.into());
            }
            if account.phone.is_some() && existing.phone == account.phone {
                return Err(AccountError::DuplicateContact { field: "phone".to_string() }.into());
            }
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(())
    }
}

//! Token repository trait defining the interface for verification
//! token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_token::{VerificationChannel, VerificationToken};
use crate::errors::DomainError;

/// Repository trait for VerificationToken persistence operations
///
/// Token history is append-only: superseded and locked-out tokens stay
/// stored; only the latest token per lane matters to the lifecycle
/// manager. Each method must be atomic with respect to concurrent
/// callers; cross-call read-then-write atomicity is the lifecycle
/// manager's job.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly issued token
    async fn insert(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Persist attempt counters, lockout flag and usage stamp of an
    /// existing token
    async fn update(&self, token: &VerificationToken) -> Result<(), DomainError>;

    /// Most recently issued token for an account, optionally narrowed
    /// to one channel
    ///
    /// When two tokens share an `issued_at` instant, the later-inserted
    /// one wins ("most recent wins").
    async fn find_latest(
        &self,
        account_id: Uuid,
        channel: Option<VerificationChannel>,
    ) -> Result<Option<VerificationToken>, DomainError>;

    /// Exact-value lookup of the opaque link token
    async fn find_by_opaque(&self, opaque: &str)
        -> Result<Option<VerificationToken>, DomainError>;
}

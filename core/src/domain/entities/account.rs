//! Account entity with contact verification flags and derived
//! lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification_token::VerificationChannel;

/// Coarse account lifecycle state, derived from verification flags
///
/// The state is never set directly; it is recomputed from the account's
/// fields after every mutation that can affect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    /// Profile or phone still missing
    Incomplete,
    /// Phone registered but not yet verified
    Obscure,
    /// Phone verified, email present but unverified
    Partially,
    /// Fully usable account
    Active,
}

/// Derive the lifecycle state from an account's flags
///
/// Total over all flag combinations, no side effects. Rules apply
/// top-down; the first match wins:
/// 1. names and phone present, phone verified, and no email or a
///    verified one: `Active`
/// 2. phone verified with an unverified email present: `Partially`
/// 3. phone present but unverified: `Obscure`
/// 4. anything else: `Incomplete`
pub fn derive_state(
    has_first_name: bool,
    has_last_name: bool,
    has_phone: bool,
    phone_verified: bool,
    has_email: bool,
    email_verified: bool,
) -> AccountState {
    if has_first_name
        && has_last_name
        && has_phone
        && phone_verified
        && (!has_email || email_verified)
    {
        AccountState::Active
    } else if phone_verified && has_email && !email_verified {
        AccountState::Partially
    } else if has_phone && !phone_verified {
        AccountState::Obscure
    } else {
        AccountState::Incomplete
    }
}

/// Account entity
///
/// `credential_hash` only ever holds a hashed secret; plaintext never
/// reaches persistence. Accounts are soft-lifecycle only and are never
/// hard-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Given name
    pub first_name: Option<String>,

    /// Family name
    pub last_name: Option<String>,

    /// Email address (unique across accounts)
    pub email: Option<String>,

    /// Whether the email address has been verified
    pub email_verified: bool,

    /// Phone number (unique across accounts)
    pub phone: Option<String>,

    /// Whether the phone number has been verified
    pub phone_verified: bool,

    /// Hashed credential secret
    pub credential_hash: String,

    /// Derived lifecycle state
    pub state: AccountState,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with both contacts unverified and the
    /// state derived from the initial fields
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        credential_hash: String,
        now: DateTime<Utc>,
    ) -> Self {
        let mut account = Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            email_verified: false,
            phone,
            phone_verified: false,
            credential_hash,
            state: AccountState::Incomplete,
            created_at: now,
            updated_at: now,
        };
        account.refresh_state();
        account
    }

    /// Contact value registered for a channel, if any
    pub fn contact(&self, channel: VerificationChannel) -> Option<&str> {
        match channel {
            VerificationChannel::Email => self.email.as_deref(),
            VerificationChannel::Phone => self.phone.as_deref(),
        }
    }

    /// Whether the contact on a channel has been verified
    pub fn is_verified(&self, channel: VerificationChannel) -> bool {
        match channel {
            VerificationChannel::Email => self.email_verified,
            VerificationChannel::Phone => self.phone_verified,
        }
    }

    /// Mark a channel's contact as verified and re-derive the state
    pub fn mark_contact_verified(&mut self, channel: VerificationChannel, now: DateTime<Utc>) {
        match channel {
            VerificationChannel::Email => self.email_verified = true,
            VerificationChannel::Phone => self.phone_verified = true,
        }
        self.updated_at = now;
        self.refresh_state();
    }

    /// Replace the credential hash
    pub fn set_credential_hash(&mut self, hash: String, now: DateTime<Utc>) {
        self.credential_hash = hash;
        self.updated_at = now;
    }

    /// Recompute the derived state from the current flags
    pub fn refresh_state(&mut self) {
        self.state = derive_state(
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.phone.is_some(),
            self.phone_verified,
            self.email.is_some(),
            self.email_verified,
        );
    }
}

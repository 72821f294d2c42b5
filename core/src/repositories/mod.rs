//! Repository ports for account and token persistence.
//!
//! The lifecycle services are the sole mutators behind these ports; no
//! other component writes token attempt counters or verification flags.

pub mod account;
pub mod token;

pub use account::{AccountRepository, MockAccountRepository};
pub use token::{MockTokenRepository, TokenRepository};

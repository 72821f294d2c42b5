//! Account registration, lookup and verification flows
//!
//! The account service is the caller of the token lifecycle: it issues
//! verification requests, applies successful validations to the
//! account's verified flags, and re-derives the lifecycle state.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AccountService, NewAccount};

//! Credential hashing and complexity policy
//!
//! bcrypt-backed one-way hashing with a self-describing output format,
//! hashed-input detection, and a configurable complexity policy.

mod config;
mod service;

pub use config::PasswordPolicy;
pub use service::PasswordService;

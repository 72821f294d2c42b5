pub mod r#trait;

pub mod mock;

pub use mock::MockTokenRepository;
pub use r#trait::TokenRepository;

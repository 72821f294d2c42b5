pub mod r#trait;

pub mod mock;

pub use mock::MockAccountRepository;
pub use r#trait::AccountRepository;

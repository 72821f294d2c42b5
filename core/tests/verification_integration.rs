//! Integration tests for the verification-token lifecycle

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use chrono::{Duration, Utc};

    use ak_core::clock::ManualClock;
    use ak_core::Clock;
    use ak_core::domain::entities::account::AccountState;
    use ak_core::domain::entities::verification_token::VerificationChannel;
    use ak_core::errors::{DomainError, ErrorKind, TokenError};
    use ak_core::repositories::{
        AccountRepository, MockAccountRepository, MockTokenRepository, TokenRepository,
    };
    use ak_core::services::account::{AccountService, NewAccount};
    use ak_core::services::password::{PasswordPolicy, PasswordService};
    use ak_core::services::token::{TokenGenerator, TokenService, TokenServiceConfig};

    // Generator that replays scripted secrets
    struct FixedGenerator {
        codes: Mutex<VecDeque<String>>,
        opaques: Mutex<VecDeque<String>>,
    }

    impl FixedGenerator {
        fn new(codes: &[&str], opaques: &[&str]) -> Self {
            Self {
                codes: Mutex::new(codes.iter().map(|s| s.to_string()).collect()),
                opaques: Mutex::new(opaques.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    impl TokenGenerator for FixedGenerator {
        fn short_code(&self) -> String {
            self.codes.lock().unwrap().pop_front().unwrap_or_else(|| "ffff".to_string())
        }

        fn opaque_token(&self) -> String {
            self.opaques
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| "fallback-opaque".to_string())
        }
    }

    struct World {
        accounts: Arc<MockAccountRepository>,
        tokens: Arc<MockTokenRepository>,
        clock: Arc<ManualClock>,
        token_service:
            Arc<TokenService<MockAccountRepository, MockTokenRepository, ManualClock, FixedGenerator>>,
        account_service:
            AccountService<MockAccountRepository, MockTokenRepository, ManualClock, FixedGenerator>,
    }

    fn world(generator: FixedGenerator) -> World {
        let accounts = Arc::new(MockAccountRepository::new());
        let tokens = Arc::new(MockTokenRepository::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token_service = Arc::new(TokenService::new(
            Arc::clone(&accounts),
            Arc::clone(&tokens),
            Arc::clone(&clock),
            Arc::new(generator),
            TokenServiceConfig::default(),
        ));
        let account_service = AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&token_service),
            PasswordService::new(PasswordPolicy { hash_cost: 4, ..PasswordPolicy::default() }),
            Arc::clone(&clock),
        );
        World { accounts, tokens, clock, token_service, account_service }
    }

    fn registration() -> NewAccount {
        NewAccount {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("9123456789".to_string()),
            password: "Sample-Secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_phone_token_full_hour_scenario() {
        // issue at t0, validate at t0+30, reissue blocked, expired at t0+61
        let w = world(FixedGenerator::new(&["ab12"], &["link-token-1"]));
        let view = w.account_service.register(registration()).await.unwrap();

        let token = w
            .token_service
            .issue(view.id, VerificationChannel::Phone)
            .await
            .unwrap();
        assert_eq!(token.short_code, "ab12");

        w.clock.advance(Duration::minutes(30));
        let channel = w
            .token_service
            .validate_short_code(view.id, "ab12", None)
            .await
            .unwrap();
        assert_eq!(channel, VerificationChannel::Phone);

        let stored = w.tokens.find_latest(view.id, None).await.unwrap().unwrap();
        assert_eq!(stored.last_used_at, Some(w.clock.now()));

        // reissue on the same lane is still blocked at t0+30
        let err = w
            .token_service
            .issue(view.id, VerificationChannel::Phone)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::ActiveTokenExists)));
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);

        // at t0+61 the same correct code only reports expiry
        w.clock.advance(Duration::minutes(31));
        let err = w
            .token_service
            .validate_short_code(view.id, "ab12", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::Expired)));
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_lockout_scenario_correct_code_after_three_misses() {
        let w = world(FixedGenerator::new(&["ab12"], &[]));
        let view = w.account_service.register(registration()).await.unwrap();
        w.token_service.issue(view.id, VerificationChannel::Phone).await.unwrap();

        for _ in 0..3 {
            let err = w
                .token_service
                .validate_short_code(view.id, "0000", None)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
        }

        // fourth attempt presents the right code and still gets locked out
        let err = w
            .token_service
            .validate_short_code(view.id, "ab12", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::Deactivated)));
        assert_eq!(err.kind(), ErrorKind::SecurityViolation);

        let stored = w.tokens.find_latest(view.id, None).await.unwrap().unwrap();
        assert!(stored.deactivated);
        assert_eq!(stored.failed_attempts, 4);
        assert!(stored.last_used_at.is_none());
    }

    #[tokio::test]
    async fn test_register_verify_and_reset_flow() {
        // every issued token consumes one opaque from the script, the
        // phone token included
        let w = world(FixedGenerator::new(
            &["ab12"],
            &["phone-link", "mail-link-1", "mail-link-2"],
        ));
        let view = w.account_service.register(registration()).await.unwrap();
        assert_eq!(view.state, AccountState::Obscure);

        // verify the phone with a short code
        w.account_service
            .request_verification(view.id, VerificationChannel::Phone)
            .await
            .unwrap();
        let after_phone = w
            .account_service
            .confirm_with_code(view.id, "ab12", Some(VerificationChannel::Phone))
            .await
            .unwrap();
        assert!(after_phone.phone_verified);
        assert_eq!(after_phone.state, AccountState::Partially);

        // verify the email through the link
        w.account_service
            .request_verification(view.id, VerificationChannel::Email)
            .await
            .unwrap();
        let after_email = w.account_service.confirm_with_link("mail-link-1").await.unwrap();
        assert!(after_email.email_verified);
        assert_eq!(after_email.state, AccountState::Active);

        // the email token expires; request a new one to authorize a reset
        w.clock.advance(Duration::minutes(61));
        w.account_service
            .request_verification(view.id, VerificationChannel::Email)
            .await
            .unwrap();
        w.account_service
            .reset_password_with_link("mail-link-2", "Next-Secret2")
            .await
            .unwrap();

        let stored = w.accounts.find_by_id(view.id).await.unwrap().unwrap();
        let passwords =
            PasswordService::new(PasswordPolicy { hash_cost: 4, ..PasswordPolicy::default() });
        assert!(passwords.verify(&stored.credential_hash, "Next-Secret2").unwrap());
    }

    #[tokio::test]
    async fn test_opaque_link_reuse_until_expiry() {
        let w = world(FixedGenerator::new(&[], &["link-token-1"]));
        let view = w.account_service.register(registration()).await.unwrap();
        w.token_service.issue(view.id, VerificationChannel::Email).await.unwrap();

        for _ in 0..3 {
            let (owner, channel) =
                w.token_service.validate_opaque_token("link-token-1").await.unwrap();
            assert_eq!(owner, view.id);
            assert_eq!(channel, VerificationChannel::Email);
            w.clock.advance(Duration::minutes(10));
        }

        w.clock.advance(Duration::minutes(40));
        let err = w.token_service.validate_opaque_token("link-token-1").await.unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::Expired)));
    }

    #[tokio::test]
    async fn test_parallel_accounts_do_not_interfere() {
        let w = world(FixedGenerator::new(&["aaaa", "bbbb"], &[]));
        let first = w.account_service.register(registration()).await.unwrap();
        let mut other = registration();
        other.email = Some("bob@example.com".to_string());
        other.phone = Some("9987654321".to_string());
        let second = w.account_service.register(other).await.unwrap();

        w.token_service.issue(first.id, VerificationChannel::Phone).await.unwrap();
        w.token_service.issue(second.id, VerificationChannel::Phone).await.unwrap();

        // exhausting one account's token leaves the other untouched
        for _ in 0..4 {
            let _ = w.token_service.validate_short_code(first.id, "0000", None).await;
        }
        let channel = w
            .token_service
            .validate_short_code(second.id, "bbbb", None)
            .await
            .unwrap();
        assert_eq!(channel, VerificationChannel::Phone);
    }
}

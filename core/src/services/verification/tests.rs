use std::sync::Arc;

use async_trait::async_trait;

use super::*;
use crate::domain::entities::otp::{OtpChannel, OtpCode, OtpPurpose};
use crate::errors::{AuthError, DomainError, ValidationError};

const EMAIL: &str = "guest@example.com";
const PHONE: &str = "+14155552671";

struct Fixture {
    service: VerificationService,
    store: Arc<InMemoryOtpStore>,
    email: Arc<MockOtpSender>,
    whatsapp: Arc<MockOtpSender>,
}

fn fixture(config: VerificationConfig) -> Fixture {
    let store = Arc::new(InMemoryOtpStore::new());
    let email = Arc::new(MockOtpSender::email());
    let whatsapp = Arc::new(MockOtpSender::whatsapp());
    let senders = OtpSenderFactory::new()
        .with_sender(email.clone())
        .with_sender(whatsapp.clone());
    Fixture {
        service: VerificationService::new(store.clone(), senders, config),
        store,
        email,
        whatsapp,
    }
}

fn no_cooldown() -> VerificationConfig {
    VerificationConfig {
        resend_cooldown_seconds: 0,
        ..VerificationConfig::default()
    }
}

#[tokio::test]
async fn test_send_and_verify_email_code() {
    let f = fixture(VerificationConfig::default());
    let result = f
        .service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();
    assert_eq!(result.channel, OtpChannel::Email);
    assert_eq!(result.masked_destination, "gu***@example.com");

    let code = f.email.last_code_for(EMAIL).await.unwrap();
    assert_eq!(code.len(), 6);

    f.service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &code)
        .await
        .unwrap();

    // Consumed
    let again = f
        .service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &code)
        .await;
    assert!(matches!(
        again,
        Err(DomainError::Auth(AuthError::VerificationCodeExpired))
    ));
}

#[tokio::test]
async fn test_code_is_stored_hashed() {
    let f = fixture(VerificationConfig::default());
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::PasswordReset, OtpChannel::Email)
        .await
        .unwrap();
    let code = f.email.last_code_for(EMAIL).await.unwrap();
    let stored = f
        .store
        .get(EMAIL, OtpPurpose::PasswordReset)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.code_hash, code);
    assert_eq!(stored.code_hash.len(), 64);
}

#[tokio::test]
async fn test_whatsapp_delivery_keyed_by_account() {
    let f = fixture(VerificationConfig::default());
    f.service
        .send_code(EMAIL, PHONE, OtpPurpose::EmailVerification, OtpChannel::WhatsApp)
        .await
        .unwrap();

    assert_eq!(f.email.sent_count().await, 0);
    let code = f.whatsapp.last_code_for(PHONE).await.unwrap();
    f.service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &code)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_destinations() {
    let f = fixture(VerificationConfig::default());
    let bad_phone = f
        .service
        .send_code(EMAIL, "0415", OtpPurpose::EmailVerification, OtpChannel::WhatsApp)
        .await;
    assert!(matches!(
        bad_phone,
        Err(DomainError::Auth(AuthError::InvalidPhoneFormat { .. }))
    ));

    let bad_email = f
        .service
        .send_code("nobody", "nobody", OtpPurpose::EmailVerification, OtpChannel::Email)
        .await;
    assert!(matches!(
        bad_email,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_resend_cooldown() {
    let f = fixture(VerificationConfig::default());
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();

    let second = f
        .service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await;
    match second {
        Err(DomainError::Auth(AuthError::ResendCooldown { seconds })) => {
            assert!(seconds > 0 && seconds <= 60)
        }
        other => panic!("expected cooldown, got {:?}", other.map(|r| r.message_id)),
    }

    // Purposes do not share a cooldown
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::PasswordReset, OtpChannel::Email)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_new_code_replaces_previous() {
    let f = fixture(no_cooldown());
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();
    let first = f.email.last_code_for(EMAIL).await.unwrap();
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();
    let second = f.email.last_code_for(EMAIL).await.unwrap();

    if first != second {
        let stale = f
            .service
            .verify_code(EMAIL, OtpPurpose::EmailVerification, &first)
            .await;
        assert!(stale.is_err());
    }
    f.service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &second)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wrong_code_counts_attempts() {
    let f = fixture(VerificationConfig::default());
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();
    let code = f.email.last_code_for(EMAIL).await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for expected_remaining in (1..5).rev() {
        let result = f
            .service
            .verify_code(EMAIL, OtpPurpose::EmailVerification, wrong)
            .await;
        match result {
            Err(DomainError::Auth(AuthError::InvalidVerificationCode { remaining_attempts })) => {
                assert_eq!(remaining_attempts, expected_remaining)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    let fifth = f
        .service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, wrong)
        .await;
    assert!(matches!(
        fifth,
        Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
    ));

    // Burnt: even the right code no longer works
    let right = f
        .service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &code)
        .await;
    assert!(right.is_err());
}

#[tokio::test]
async fn test_expired_code() {
    let f = fixture(VerificationConfig::default());
    let otp = OtpCode::new(
        EMAIL.to_string(),
        OtpPurpose::PasswordReset,
        OtpChannel::Email,
        "irrelevant".to_string(),
        -1,
        5,
    );
    f.store.put(otp).await.unwrap();

    let result = f
        .service
        .verify_code(EMAIL, OtpPurpose::PasswordReset, "123456")
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::VerificationCodeExpired))
    ));
    assert!(f
        .store
        .get(EMAIL, OtpPurpose::PasswordReset)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_purposes_are_isolated() {
    let f = fixture(VerificationConfig::default());
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::PasswordReset, OtpChannel::Email)
        .await
        .unwrap();
    let code = f.email.last_code_for(EMAIL).await.unwrap();

    let result = f
        .service
        .verify_code(EMAIL, OtpPurpose::EmailVerification, &code)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_delivery_failure_releases_cooldown() {
    let f = fixture(VerificationConfig::default());
    f.email.set_should_fail(true);

    let result = f
        .service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DeliveryFailure))
    ));

    f.email.set_should_fail(false);
    f.service
        .send_code(EMAIL, EMAIL, OtpPurpose::EmailVerification, OtpChannel::Email)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unconfigured_channel() {
    let store = Arc::new(InMemoryOtpStore::new());
    let senders = OtpSenderFactory::new().with_sender(Arc::new(MockOtpSender::email()));
    let service = VerificationService::new(store, senders, VerificationConfig::default());

    assert!(!service.supports(OtpChannel::WhatsApp));
    let result = service
        .send_code(EMAIL, PHONE, OtpPurpose::EmailVerification, OtpChannel::WhatsApp)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::ChannelUnavailable { .. }))
    ));
}

#[tokio::test]
async fn test_purge_expired_codes() {
    let store = InMemoryOtpStore::new();
    store
        .put(OtpCode::new(
            EMAIL.to_string(),
            OtpPurpose::PasswordReset,
            OtpChannel::Email,
            "h".to_string(),
            -1,
            5,
        ))
        .await
        .unwrap();
    assert_eq!(store.purge_expired().await, 1);
}

/// Store that yields to the scheduler around every call, as a networked
/// store would
struct YieldingStore(InMemoryOtpStore);

#[async_trait]
impl OtpStore for YieldingStore {
    async fn put(&self, code: OtpCode) -> Result<(), String> {
        tokio::task::yield_now().await;
        self.0.put(code).await
    }

    async fn get(
        &self,
        recipient_key: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, String> {
        tokio::task::yield_now().await;
        let code = self.0.get(recipient_key, purpose).await;
        tokio::task::yield_now().await;
        code
    }

    async fn record_attempt(&self, code: &OtpCode) -> Result<u32, String> {
        tokio::task::yield_now().await;
        let count = self.0.record_attempt(code).await;
        tokio::task::yield_now().await;
        count
    }

    async fn remove(&self, recipient_key: &str, purpose: OtpPurpose) -> Result<bool, String> {
        tokio::task::yield_now().await;
        self.0.remove(recipient_key, purpose).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_wrong_guesses_each_burn_an_attempt() {
    let email = Arc::new(MockOtpSender::email());
    let service = Arc::new(VerificationService::new(
        Arc::new(YieldingStore(InMemoryOtpStore::new())),
        OtpSenderFactory::new().with_sender(email.clone()),
        VerificationConfig::default(),
    ));
    service
        .send_code(EMAIL, EMAIL, OtpPurpose::PasswordReset, OtpChannel::Email)
        .await
        .unwrap();
    let code = email.last_code_for(EMAIL).await.unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let guesses: Vec<_> = (0..50)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .verify_code(EMAIL, OtpPurpose::PasswordReset, wrong)
                    .await
            })
        })
        .collect();

    let mut compared = 0;
    for guess in guesses {
        match guess.await.unwrap() {
            Err(DomainError::Auth(AuthError::InvalidVerificationCode { .. })) => compared += 1,
            Err(DomainError::Auth(
                AuthError::MaxAttemptsExceeded | AuthError::VerificationCodeExpired,
            )) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
    assert!(compared <= 4, "{} wrong guesses were checked", compared);

    let right = service
        .verify_code(EMAIL, OtpPurpose::PasswordReset, &code)
        .await;
    assert!(right.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_correct_submissions_succeed_once() {
    let email = Arc::new(MockOtpSender::email());
    let service = Arc::new(VerificationService::new(
        Arc::new(YieldingStore(InMemoryOtpStore::new())),
        OtpSenderFactory::new().with_sender(email.clone()),
        VerificationConfig::default(),
    ));
    service
        .send_code(EMAIL, EMAIL, OtpPurpose::PasswordReset, OtpChannel::Email)
        .await
        .unwrap();
    let code = email.last_code_for(EMAIL).await.unwrap();

    let submissions: Vec<_> = (0..20)
        .map(|_| {
            let service = service.clone();
            let code = code.clone();
            tokio::spawn(async move {
                service
                    .verify_code(EMAIL, OtpPurpose::PasswordReset, &code)
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    for submission in submissions {
        if submission.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn test_attempt_count_survives_removal_until_new_code() {
    let store = InMemoryOtpStore::new();
    let code = OtpCode::new(
        EMAIL.to_string(),
        OtpPurpose::PasswordReset,
        OtpChannel::Email,
        "h".to_string(),
        600,
        5,
    );
    store.put(code.clone()).await.unwrap();
    assert_eq!(store.record_attempt(&code).await.unwrap(), 1);
    assert!(store.remove(EMAIL, OtpPurpose::PasswordReset).await.unwrap());
    assert_eq!(store.record_attempt(&code).await.unwrap(), 2);

    store.put(code.clone()).await.unwrap();
    assert_eq!(store.record_attempt(&code).await.unwrap(), 1);
}

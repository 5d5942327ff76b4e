use chrono::{Duration, Utc};

use mol_api::domain::types::NotifyPolicy;
use mol_api::error::ApiError;
use mol_api::usecase::verification::{ConsumeVerificationUseCase, IssueVerificationUseCase};

use crate::helpers::{
    MockAccountRepo, PORTAL_BASE, RecordingNotifier, test_account, token_from_email,
    unverified_account,
};

fn issue_usecase(
    accounts: MockAccountRepo,
    notifier: RecordingNotifier,
) -> IssueVerificationUseCase<MockAccountRepo, RecordingNotifier> {
    IssueVerificationUseCase {
        accounts,
        notifier,
        portal_base: PORTAL_BASE.to_owned(),
    }
}

// ── IssueVerificationUseCase ─────────────────────────────────────────────────

#[tokio::test]
async fn should_store_token_with_24h_expiry_and_email_link() {
    let account = unverified_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();
    let notifier = RecordingNotifier::new();
    let sent = notifier.sent_handle();

    let before = Utc::now();
    issue_usecase(accounts, notifier)
        .execute(account.id, NotifyPolicy::Propagate)
        .await
        .unwrap();

    let stored = handle.lock().unwrap()[0].clone();
    let token = stored.verification_token.expect("token stored");
    assert_eq!(token.len(), 64);
    let expires_at = stored.verification_token_expires_at.unwrap();
    assert!(expires_at >= before + Duration::hours(24));
    assert!(expires_at <= Utc::now() + Duration::hours(24));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Mol - Verify Your Email");
    assert_eq!(sent[0].to[0].email, account.email);
    assert!(
        sent[0]
            .body
            .contains(&format!("{PORTAL_BASE}/register/verification/{token}"))
    );
}

#[tokio::test]
async fn should_replace_previous_token_on_reissue() {
    let account = unverified_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();
    let usecase = issue_usecase(accounts, RecordingNotifier::new());

    usecase
        .execute(account.id, NotifyPolicy::Propagate)
        .await
        .unwrap();
    let first = handle.lock().unwrap()[0].verification_token.clone().unwrap();
    usecase
        .execute(account.id, NotifyPolicy::Propagate)
        .await
        .unwrap();
    let second = handle.lock().unwrap()[0].verification_token.clone().unwrap();
    assert_ne!(first, second);

    let consume = ConsumeVerificationUseCase {
        accounts: MockAccountRepo {
            accounts: handle.clone(),
        },
    };
    let result = consume.execute(&first).await;
    assert!(
        matches!(result, Err(ApiError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    consume.execute(&second).await.unwrap();
    assert!(handle.lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_reject_issue_for_verified_account() {
    let account = test_account();
    let notifier = RecordingNotifier::new();
    let sent = notifier.sent_handle();

    let result = issue_usecase(MockAccountRepo::new(vec![account.clone()]), notifier)
        .execute(account.id, NotifyPolicy::Propagate)
        .await;

    assert!(
        matches!(result, Err(ApiError::AlreadyVerified)),
        "expected AlreadyVerified, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_account_not_found_for_unknown_email() {
    let result = issue_usecase(MockAccountRepo::empty(), RecordingNotifier::new())
        .execute_for_email("ghost@example.com", NotifyPolicy::Propagate)
        .await;
    assert!(
        matches!(result, Err(ApiError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_token_when_swallowing_delivery_failure() {
    let account = unverified_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();

    issue_usecase(accounts, RecordingNotifier::failing())
        .execute(account.id, NotifyPolicy::Swallow)
        .await
        .unwrap();

    assert!(handle.lock().unwrap()[0].verification_token.is_some());
}

#[tokio::test]
async fn should_surface_delivery_failure_on_resend() {
    let account = unverified_account();
    let result = issue_usecase(
        MockAccountRepo::new(vec![account.clone()]),
        RecordingNotifier::failing(),
    )
    .execute_for_email(&account.email, NotifyPolicy::Propagate)
    .await;
    assert!(
        matches!(result, Err(ApiError::Internal(_))),
        "expected Internal, got {result:?}"
    );
}

// ── ConsumeVerificationUseCase ───────────────────────────────────────────────

#[tokio::test]
async fn should_verify_once_then_reject_reuse() {
    let mut account = unverified_account();
    account.verification_token = Some("a".repeat(64));
    account.verification_token_expires_at = Some(Utc::now() + Duration::hours(24));
    let accounts = MockAccountRepo::new(vec![account]);
    let handle = accounts.accounts_handle();
    let usecase = ConsumeVerificationUseCase { accounts };

    usecase.execute(&"a".repeat(64)).await.unwrap();
    {
        let stored = &handle.lock().unwrap()[0];
        assert!(stored.is_verified);
        assert!(stored.verification_token.is_none());
        assert!(stored.verification_token_expires_at.is_none());
    }

    let result = usecase.execute(&"a".repeat(64)).await;
    assert!(
        matches!(result, Err(ApiError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_token_without_mutation() {
    let mut account = unverified_account();
    account.verification_token = Some("b".repeat(64));
    let accounts = MockAccountRepo::new(vec![account]);
    let handle = accounts.accounts_handle();

    let result = ConsumeVerificationUseCase { accounts }
        .execute("never-issued")
        .await;

    assert!(
        matches!(result, Err(ApiError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
    let stored = &handle.lock().unwrap()[0];
    assert!(!stored.is_verified);
    assert_eq!(stored.verification_token.as_deref(), Some("b".repeat(64).as_str()));
}

#[tokio::test]
async fn should_reject_empty_token() {
    let result = ConsumeVerificationUseCase {
        accounts: MockAccountRepo::new(vec![unverified_account()]),
    }
    .execute("")
    .await;
    assert!(
        matches!(result, Err(ApiError::InvalidToken)),
        "expected InvalidToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_accept_verification_token_past_its_expiry() {
    let mut account = unverified_account();
    account.verification_token = Some("c".repeat(64));
    account.verification_token_expires_at = Some(Utc::now() - Duration::hours(48));
    let accounts = MockAccountRepo::new(vec![account]);
    let handle = accounts.accounts_handle();

    ConsumeVerificationUseCase { accounts }
        .execute(&"c".repeat(64))
        .await
        .unwrap();
    assert!(handle.lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_verify_with_token_from_emailed_link() {
    let account = unverified_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();
    let notifier = RecordingNotifier::new();
    let sent = notifier.sent_handle();

    issue_usecase(accounts, notifier)
        .execute(account.id, NotifyPolicy::Propagate)
        .await
        .unwrap();
    let token = token_from_email(&sent.lock().unwrap()[0]);

    ConsumeVerificationUseCase {
        accounts: MockAccountRepo {
            accounts: handle.clone(),
        },
    }
    .execute(&token)
    .await
    .unwrap();
    assert!(handle.lock().unwrap()[0].is_verified);
}

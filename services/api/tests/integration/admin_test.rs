use uuid::Uuid;

use mol_api::domain::types::AccountStatistics;
use mol_api::error::ApiError;
use mol_api::usecase::admin::{
    AccountStatisticsUseCase, AdminSetPasswordUseCase, GetAccountForAdminUseCase,
    ListAccountsUseCase, SetAccountActiveUseCase,
};
use mol_domain::pagination::PageRequest;
use mol_domain::permission::Actor;
use mol_domain::role::Role;

use crate::helpers::{MockAccountRepo, account_with_role, test_account, test_hasher};

fn admin() -> Actor {
    Actor {
        id: Uuid::from_u128(99),
        role: Some(Role::Admin),
    }
}

fn member() -> Actor {
    Actor {
        id: Uuid::from_u128(98),
        role: Some(Role::Member),
    }
}

fn population() -> Vec<mol_api::domain::types::Account> {
    let mut blocked = account_with_role(2, Some(Role::Writer));
    blocked.is_active = false;
    let mut pending = account_with_role(3, Some(Role::Member));
    pending.is_verified = false;
    vec![test_account(), blocked, pending, account_with_role(4, None)]
}

#[tokio::test]
async fn should_block_and_unblock_account() {
    let account = test_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();
    let usecase = SetAccountActiveUseCase { accounts };

    usecase.execute(&admin(), account.id, false).await.unwrap();
    assert!(!handle.lock().unwrap()[0].is_active);

    usecase.execute(&admin(), account.id, true).await.unwrap();
    assert!(handle.lock().unwrap()[0].is_active);
}

#[tokio::test]
async fn should_report_unknown_account_when_blocking() {
    let result = SetAccountActiveUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(&admin(), Uuid::from_u128(404), false)
    .await;
    assert!(
        matches!(result, Err(ApiError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_non_admins_from_administering() {
    let account = test_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();

    let result = SetAccountActiveUseCase { accounts }
        .execute(&member(), account.id, false)
        .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
    assert!(handle.lock().unwrap()[0].is_active);

    let result = AccountStatisticsUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(&member())
    .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );

    let result = ListAccountsUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(&member(), PageRequest::default())
    .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

#[tokio::test]
async fn should_set_password_without_current_one() {
    let account = test_account();
    let accounts = MockAccountRepo::new(vec![account.clone()]);
    let handle = accounts.accounts_handle();

    AdminSetPasswordUseCase {
        accounts,
        hasher: test_hasher(),
    }
    .execute(&admin(), account.id, "Replaced77", "Replaced77")
    .await
    .unwrap();

    assert!(test_hasher().verify("Replaced77", &handle.lock().unwrap()[0].password_hash));
}

#[tokio::test]
async fn should_validate_admin_password_change() {
    let account = test_account();
    let usecase = AdminSetPasswordUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        hasher: test_hasher(),
    };

    let result = usecase
        .execute(&admin(), account.id, "Replaced77", "Replaced78")
        .await;
    assert!(
        matches!(&result, Err(ApiError::Validation(msg)) if msg == "Passwords do not match."),
        "expected Validation, got {result:?}"
    );

    let result = usecase
        .execute(&admin(), account.id, "onlyletters", "onlyletters")
        .await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );

    let result = usecase
        .execute(&admin(), Uuid::from_u128(404), "Replaced77", "Replaced77")
        .await;
    assert!(
        matches!(result, Err(ApiError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_compute_account_statistics() {
    let stats = AccountStatisticsUseCase {
        accounts: MockAccountRepo::new(population()),
    }
    .execute(&admin())
    .await
    .unwrap();
    assert_eq!(
        stats,
        AccountStatistics {
            total_users: 4,
            active_users: 3,
            inactive_users: 1,
            verified_users: 3,
        }
    );
}

#[tokio::test]
async fn should_page_account_listing() {
    let page = ListAccountsUseCase {
        accounts: MockAccountRepo::new(population()),
    }
    .execute(&admin(), PageRequest::parse(Some("2"), Some("3")))
    .await
    .unwrap();
    assert_eq!(page.count, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn should_look_up_account_by_email_or_id() {
    let usecase = GetAccountForAdminUseCase {
        accounts: MockAccountRepo::new(population()),
    };

    let by_email = usecase
        .execute(&admin(), Some("ada@example.com".to_owned()), None)
        .await
        .unwrap();
    assert_eq!(by_email.id, test_account().id);

    let by_id = usecase
        .execute(&admin(), None, Some(Uuid::from_u128(3).to_string()))
        .await
        .unwrap();
    assert_eq!(by_id.username, "user3");
}

#[tokio::test]
async fn should_require_exactly_one_lookup_key() {
    let usecase = GetAccountForAdminUseCase {
        accounts: MockAccountRepo::new(population()),
    };

    let result = usecase.execute(&admin(), None, None).await;
    assert!(
        matches!(&result, Err(ApiError::Validation(msg))
            if msg == "Please provide either 'email' or 'user_id' query parameter"),
        "expected Validation, got {result:?}"
    );

    let result = usecase
        .execute(
            &admin(),
            Some("ada@example.com".to_owned()),
            Some(test_account().id.to_string()),
        )
        .await;
    assert!(
        matches!(&result, Err(ApiError::Validation(msg))
            if msg == "Please provide either 'email' or 'user_id', not both"),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_unknown_or_malformed_lookup_as_not_found() {
    let usecase = GetAccountForAdminUseCase {
        accounts: MockAccountRepo::new(population()),
    };

    let result = usecase
        .execute(&admin(), Some("nobody@example.com".to_owned()), None)
        .await;
    assert!(
        matches!(result, Err(ApiError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );

    let result = usecase
        .execute(&admin(), None, Some("not-a-uuid".to_owned()))
        .await;
    assert!(
        matches!(result, Err(ApiError::AccountNotFound)),
        "expected AccountNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_forbid_lookup_before_checking_parameters() {
    let result = GetAccountForAdminUseCase {
        accounts: MockAccountRepo::new(population()),
    }
    .execute(&member(), None, None)
    .await;
    assert!(
        matches!(result, Err(ApiError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

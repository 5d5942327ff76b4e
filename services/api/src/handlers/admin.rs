use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mol_domain::pagination::{Page, PageQuery};

use crate::domain::types::{Account, AccountStatistics};
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::admin::{
    AccountStatisticsUseCase, AdminSetPasswordUseCase, GetAccountForAdminUseCase,
    ListAccountsUseCase, SetAccountActiveUseCase,
};

#[derive(Serialize)]
pub struct AdminAccountResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub role: Option<&'static str>,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub date_joined: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Account> for AdminAccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            firstname: account.firstname,
            lastname: account.lastname,
            role: account.role.map(|r| r.as_str()),
            is_active: account.is_active,
            is_verified: account.is_verified,
            date_joined: account.date_joined,
            last_login: account.last_login,
        }
    }
}

// ── GET /api/admin/users/ ────────────────────────────────────────────────────

pub async fn list_users(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<AdminAccountResponse>>, ApiError> {
    let usecase = ListAccountsUseCase {
        accounts: state.account_repo(),
    };
    let page = usecase.execute(&identity.actor(), query.into()).await?;
    Ok(Json(page.map(AdminAccountResponse::from)))
}

// ── GET /api/admin/users/get/ ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GetUserQuery {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

pub async fn get_user(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Query(query): Query<GetUserQuery>,
) -> Result<Json<AdminAccountResponse>, ApiError> {
    let usecase = GetAccountForAdminUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(&identity.actor(), query.email, query.user_id)
        .await?;
    Ok(Json(account.into()))
}

// ── PUT /api/admin/users/{id}/block/ ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct BlockRequest {
    pub is_active: bool,
}

pub async fn set_user_active(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<BlockRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = SetAccountActiveUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(&identity.actor(), id, body.is_active)
        .await?;
    let message = if body.is_active {
        "User unblocked successfully"
    } else {
        "User blocked successfully"
    };
    Ok(MessageResponse::new(message))
}

// ── PUT /api/admin/users/{id}/password/ ──────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

pub async fn set_user_password(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = AdminSetPasswordUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(
            &identity.actor(),
            id,
            &body.new_password,
            &body.confirm_password,
        )
        .await?;
    Ok(MessageResponse::new("Password updated successfully."))
}

// ── GET /api/admin/users/statistics/ ─────────────────────────────────────────

pub async fn user_statistics(
    identity: ActiveIdentity,
    State(state): State<AppState>,
) -> Result<Json<AccountStatistics>, ApiError> {
    let usecase = AccountStatisticsUseCase {
        accounts: state.account_repo(),
    };
    Ok(Json(usecase.execute(&identity.actor()).await?))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Account, NotifyPolicy};
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::account::{
    AuthenticateUseCase, ChangePasswordInput, ChangePasswordUseCase, GetAccountUseCase,
    RegisterInput, RegisterUseCase,
};
use crate::usecase::reset::{ConsumeResetInput, ConsumeResetUseCase, IssueResetUseCase};
use crate::usecase::verification::{ConsumeVerificationUseCase, IssueVerificationUseCase};

// ── POST /api/accounts/auth/register/ ────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    #[serde(default)]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        notifier: state.notifier(),
        hasher: state.hasher,
        portal_base: state.portal_base.clone(),
    };
    usecase
        .execute(RegisterInput {
            email: body.email,
            username: body.username,
            password: body.password,
            firstname: body.firstname,
            lastname: body.lastname,
            middlename: body.middlename,
            phonenumber: body.phonenumber,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new(
            "Registration successful. Please check your email to verify your account.",
        ),
    ))
}

// ── POST /api/accounts/auth/token/ ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email or username.
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = AuthenticateUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
        jwt_secret: state.jwt_secret.clone(),
        access_token_ttl: state.access_token_ttl,
    };
    let credential = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(LoginResponse {
        access_token: credential.token,
    }))
}

// ── GET /api/accounts/account-status/ ────────────────────────────────────────

#[derive(Serialize)]
pub struct AccountStatusResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub role: Option<&'static str>,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub date_joined: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Account> for AccountStatusResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role.map(|r| r.as_str()),
            is_active: account.is_active,
            is_verified: account.is_verified,
            date_joined: account.date_joined,
            last_login: account.last_login,
        }
    }
}

pub async fn account_status(
    identity: ActiveIdentity,
    State(state): State<AppState>,
) -> Result<Json<AccountStatusResponse>, ApiError> {
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(identity.account_id()).await?;
    Ok(Json(account.into()))
}

// ── POST /api/accounts/send-verification-email/ ──────────────────────────────

#[derive(Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

pub async fn send_verification_email(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = IssueVerificationUseCase {
        accounts: state.account_repo(),
        notifier: state.notifier(),
        portal_base: state.portal_base.clone(),
    };
    usecase
        .execute_for_email(&body.email, NotifyPolicy::Propagate)
        .await?;
    Ok(MessageResponse::new("Verification email sent."))
}

// ── POST /api/accounts/verify/{token}/ ───────────────────────────────────────

pub async fn verify_account(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = ConsumeVerificationUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(&token).await?;
    Ok(MessageResponse::new("Account verified successfully"))
}

// ── POST /api/accounts/send-password-reset-email/ ────────────────────────────

pub async fn send_password_reset_email(
    State(state): State<AppState>,
    Json(body): Json<EmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = IssueResetUseCase {
        accounts: state.account_repo(),
        notifier: state.notifier(),
        portal_base: state.portal_base.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(MessageResponse::new("Password reset email sent"))
}

// ── POST /api/accounts/reset-password/{token}/ ───────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = ConsumeResetUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(ConsumeResetInput {
            token,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;
    Ok(MessageResponse::new("Password reset successful"))
}

// ── POST /api/accounts/auth/logout/ ──────────────────────────────────────────

/// Credentials are stateless; the client drops its token.
pub async fn logout(_identity: ActiveIdentity) -> Json<MessageResponse> {
    MessageResponse::new("Logged out successfully")
}

// ── PUT /api/accounts/user/change-password/ ──────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

pub async fn change_password(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = ChangePasswordUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(
            identity.account_id(),
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
                confirm_new_password: body.confirm_new_password,
            },
        )
        .await?;
    Ok(MessageResponse::new("Password updated successfully."))
}

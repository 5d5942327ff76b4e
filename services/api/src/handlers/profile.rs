use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Account, ProfilePatch};
use crate::error::ApiError;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::account::{GetAccountUseCase, UpdateProfileUseCase};

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
    pub fullname: String,
}

impl From<Account> for ProfileResponse {
    fn from(account: Account) -> Self {
        let fullname = account.display_name();
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            firstname: account.firstname,
            lastname: account.lastname,
            middlename: account.middlename,
            phonenumber: account.phonenumber,
            fullname,
        }
    }
}

// ── GET /api/user-profile/user/profile/ ──────────────────────────────────────

pub async fn get_profile(
    identity: ActiveIdentity,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = GetAccountUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(identity.account_id()).await?;
    Ok(Json(account.into()))
}

// ── PUT /api/user-profile/user/profile/ ──────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
}

pub async fn update_profile(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase
        .execute(
            identity.account_id(),
            ProfilePatch {
                firstname: body.firstname,
                lastname: body.lastname,
                middlename: body.middlename,
                phonenumber: body.phonenumber,
            },
        )
        .await?;
    Ok(Json(account.into()))
}

//! Request identity backed by the stored account.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use mol_auth_types::identity::Identity;
use mol_domain::permission::Actor;

use crate::domain::types::Account;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::account::ResolveIdentityUseCase;

/// Caller identity whose account still exists and is active.
///
/// The bearer credential only names the account; the role used for
/// authorization is read from the stored row on every request.
#[derive(Debug, Clone)]
pub struct ActiveIdentity {
    pub account: Account,
}

impl ActiveIdentity {
    pub fn account_id(&self) -> Uuid {
        self.account.id
    }

    pub fn actor(&self) -> Actor {
        Actor {
            id: self.account.id,
            role: self.account.role,
        }
    }
}

impl FromRequestParts<AppState> for ActiveIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let identity = Identity::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Unauthorized)?;
        let account = ResolveIdentityUseCase {
            accounts: state.account_repo(),
        }
        .execute(identity.account_id)
        .await?;
        Ok(Self { account })
    }
}

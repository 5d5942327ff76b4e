//! Bearer-credential identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use mol_domain::permission::Actor;
use mol_domain::role::Role;

use crate::token::validate_access_token;

/// HS256 signing secret for access credentials, pulled out of router state.
#[derive(Debug, Clone)]
pub struct JwtSecret(pub String);

/// Caller identity taken from a validated `Authorization: Bearer <jwt>` header.
///
/// Returns 401 if the header is absent, not a bearer credential, or fails
/// validation (bad signature, expired, malformed). Role enforcement (403) is
/// done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub account_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
}

impl Identity {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.account_id,
            role: self.role,
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Extract synchronously and return a 'static future; an `async fn` here
    // would capture `parts` and fail the `+ Send` bound.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let bearer = parts.headers.typed_get::<Authorization<Bearer>>();

        let result = match bearer {
            None => Err(StatusCode::UNAUTHORIZED),
            Some(Authorization(bearer)) => validate_access_token(bearer.token(), &secret.0)
                .map(|info| Self {
                    account_id: info.account_id,
                    email: info.email,
                    role: info.role,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer credential");
                    StatusCode::UNAUTHORIZED
                }),
        };

        async move { result }
    }
}

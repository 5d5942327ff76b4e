use chrono::{DateTime, Duration, Utc};
use rand::RngExt;

use mol_auth_types::token::{AccessClaims, encode_access_token};

use crate::domain::types::{ACTION_TOKEN_LEN, Account};
use crate::error::ApiError;

/// Charset for emailed action tokens (URL path safe).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random single-use action token: 64 alphanumeric characters from the
/// thread-local CSPRNG.
pub fn generate_action_token() -> String {
    let mut rng = rand::rng();
    (0..ACTION_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// A freshly generated action token and its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn new(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: generate_action_token(),
            expires_at: now + ttl,
        }
    }
}

/// Signed access credential returned from login.
#[derive(Debug, Clone)]
pub struct AccessCredential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mint an HS256 access credential carrying id, email and role of `account`.
pub fn issue_access_token(
    account: &Account,
    secret: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<AccessCredential, ApiError> {
    let expires_at = now + ttl;
    let claims = AccessClaims::new(
        account.id,
        &account.email,
        account.role,
        now.timestamp() as u64,
        expires_at.timestamp() as u64,
    );
    let token =
        encode_access_token(&claims, secret).map_err(|e| ApiError::Internal(e.into()))?;
    Ok(AccessCredential { token, expires_at })
}

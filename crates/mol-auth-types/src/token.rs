//! JWT access-credential encoding and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use uuid::Uuid;

use mol_domain::role::Role;

/// Value of the `token_type` claim on access credentials.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// Account identity extracted from a validated access credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub account_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload of an access credential.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | account ID (UUID string) |
/// | `user_id` | account ID, duplicated for portal clients that read it directly |
/// | `email` | account email |
/// | `role` | role name, `null` when the account has no role |
/// | `token_type` | always `"access"` |
/// | `iat` / `exp` | seconds since epoch |
///
/// [`Deserialize`] is always available. [`Serialize`] requires the **`issuer`**
/// feature; only the API service mints credentials.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct AccessClaims {
    pub sub: String,
    pub user_id: String,
    pub email: String,
    pub role: Option<String>,
    pub token_type: String,
    pub iat: u64,
    pub exp: u64,
}

impl AccessClaims {
    #[cfg(any(feature = "issuer", test))]
    pub fn new(account_id: Uuid, email: &str, role: Option<Role>, iat: u64, exp: u64) -> Self {
        Self {
            sub: account_id.to_string(),
            user_id: account_id.to_string(),
            email: email.to_owned(),
            role: role.map(|r| r.as_str().to_owned()),
            token_type: ACCESS_TOKEN_TYPE.to_owned(),
            iat,
            exp,
        }
    }
}

/// Sign claims with HS256.
#[cfg(any(feature = "issuer", test))]
pub fn encode_access_token(
    claims: &AccessClaims,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a JWT, returning raw claims.
///
/// HS256, `exp` checked with the default 60s leeway, `exp` + `sub` required.
fn decode_jwt(token: &str, secret: &str) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer credential, returning the identity it encodes.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    if claims.token_type != ACCESS_TOKEN_TYPE {
        return Err(AuthError::Malformed);
    }
    let account_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    let role = claims
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        account_id,
        email: claims.email,
        role,
        exp: claims.exp,
    })
}

//! Mock auth helpers for integration tests.
//!
//! Authenticated routes expect `Authorization: Bearer <jwt>`. `MockAuth` mints a
//! credential for an arbitrary identity with the test secret, so tests do not
//! have to go through the login flow.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use chrono::Utc;
use uuid::Uuid;

use mol_auth_types::token::{AccessClaims, encode_access_token};
use mol_domain::role::Role;

/// Secret shared by `MockAuth` and test `AppState`s.
pub const TEST_JWT_SECRET: &str = "mol-test-secret";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub account_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
}

impl MockAuth {
    pub fn new(account_id: Uuid, role: Option<Role>) -> Self {
        Self {
            account_id,
            email: format!("{account_id}@example.com"),
            role,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_owned();
        self
    }

    /// A signed access credential valid for ten minutes.
    pub fn token(&self) -> String {
        let now = Utc::now().timestamp() as u64;
        let claims = AccessClaims::new(self.account_id, &self.email, self.role, now, now + 600);
        encode_access_token(&claims, TEST_JWT_SECRET).unwrap()
    }

    /// `Authorization: Bearer <jwt>` value.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap()
    }

    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, self.bearer());
        map
    }
}

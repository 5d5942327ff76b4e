use serde::Deserialize;

use mol_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access credentials.
    pub jwt_secret: String,
    /// Base URL of the portal web app; emailed links point here.
    pub portal_web_app_url: String,
    /// Mail relay endpoint accepting `{subject, body, to}` JSON.
    pub smtp_send_mail_url: String,
    /// Bearer key for the mail relay.
    pub smtp_api_key: String,
    /// TCP port to listen on (default 8000). Env var: `API_PORT`.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Recipient of contact-form notifications.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_contact_name")]
    pub contact_name: String,
    /// PBKDF2 iterations for newly hashed passwords.
    #[serde(default = "default_password_hash_iterations")]
    pub password_hash_iterations: u32,
    #[serde(default = "default_access_token_ttl_minutes")]
    pub access_token_ttl_minutes: i64,
}

impl Config for ApiConfig {}

fn default_api_port() -> u16 {
    8000
}

fn default_contact_email() -> String {
    "contact@mol.com".to_owned()
}

fn default_contact_name() -> String {
    "Mol Support".to_owned()
}

fn default_password_hash_iterations() -> u32 {
    600_000
}

fn default_access_token_ttl_minutes() -> i64 {
    200
}

impl ApiConfig {
    /// Portal base URL without a trailing slash.
    pub fn portal_base(&self) -> &str {
        self.portal_web_app_url.trim_end_matches('/')
    }
}

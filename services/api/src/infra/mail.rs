use anyhow::{Context as _, anyhow};
use reqwest::{Client, StatusCode};

use crate::domain::repository::Notifier;
use crate::domain::types::OutgoingEmail;
use crate::error::ApiError;

/// Delivers email through the HTTP mail relay.
///
/// One POST per message; a non-200 answer is a failure.
#[derive(Clone)]
pub struct HttpNotifier {
    pub client: Client,
    pub url: String,
    pub api_key: String,
}

impl HttpNotifier {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl Notifier for HttpNotifier {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .context("send mail relay request")?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("mail relay responded {status}: {body}").into());
        }
        Ok(())
    }
}

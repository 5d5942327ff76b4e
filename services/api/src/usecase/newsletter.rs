use mol_domain::validation::normalize_email;
use validator::ValidateEmail;

use crate::domain::repository::{NewsletterRepository, Notifier};
use crate::domain::types::NotifyPolicy;
use crate::error::ApiError;
use crate::usecase::mail::{deliver, newsletter_email, newsletter_link};
use crate::usecase::token::generate_action_token;

// ── RegisterNewsletter ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterRegistration {
    /// New subscription created and confirmation email sent.
    Created,
    /// Existing unverified subscription; token regenerated and email resent.
    Resent,
    /// Already verified; nothing changed.
    AlreadySubscribed,
}

pub struct RegisterNewsletterUseCase<R, N>
where
    R: NewsletterRepository,
    N: Notifier,
{
    pub repo: R,
    pub notifier: N,
    pub portal_base: String,
}

impl<R, N> RegisterNewsletterUseCase<R, N>
where
    R: NewsletterRepository,
    N: Notifier,
{
    pub async fn execute(&self, email: &str) -> Result<NewsletterRegistration, ApiError> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(ApiError::validation("Enter a valid email address."));
        }

        let token = generate_action_token();
        let outcome = match self.repo.find_by_email(&email).await? {
            Some(sub) if sub.is_verified => return Ok(NewsletterRegistration::AlreadySubscribed),
            Some(sub) => {
                self.repo.set_token(sub.id, &token).await?;
                NewsletterRegistration::Resent
            }
            None => {
                self.repo.create(&email, &token).await?;
                NewsletterRegistration::Created
            }
        };

        let link = newsletter_link(&self.portal_base, &token);
        deliver(
            &self.notifier,
            &newsletter_email(&email, &link),
            NotifyPolicy::Propagate,
        )
        .await?;
        Ok(outcome)
    }
}

// ── VerifyNewsletter ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterVerification {
    Verified,
    AlreadyVerified,
}

pub struct VerifyNewsletterUseCase<R: NewsletterRepository> {
    pub repo: R,
}

impl<R: NewsletterRepository> VerifyNewsletterUseCase<R> {
    pub async fn execute(&self, token: &str) -> Result<NewsletterVerification, ApiError> {
        if token.is_empty() {
            return Err(ApiError::InvalidToken);
        }
        let sub = self
            .repo
            .find_by_token(token)
            .await?
            .ok_or(ApiError::InvalidToken)?;
        if sub.is_verified {
            return Ok(NewsletterVerification::AlreadyVerified);
        }
        if !self.repo.consume_token(token).await? {
            return Err(ApiError::InvalidToken);
        }
        Ok(NewsletterVerification::Verified)
    }
}

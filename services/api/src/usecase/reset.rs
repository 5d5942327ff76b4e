use chrono::{Duration, Utc};

use mol_domain::validation::check_password_policy;

use crate::domain::repository::{AccountRepository, Notifier};
use crate::domain::types::{NotifyPolicy, RESET_TOKEN_TTL_HOURS};
use crate::error::ApiError;
use crate::usecase::mail::{deliver, reset_email, reset_link};
use crate::usecase::password::PasswordHasher;
use crate::usecase::token::IssuedToken;

// ── IssueReset ───────────────────────────────────────────────────────────────

pub struct IssueResetUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    pub accounts: A,
    pub notifier: N,
    pub portal_base: String,
}

impl<A, N> IssueResetUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    /// Email a one-hour reset link. Delivery failure is surfaced.
    pub async fn execute(&self, email: &str) -> Result<(), ApiError> {
        let account = self
            .accounts
            .find_by_email(email.trim())
            .await?
            .ok_or(ApiError::NoSuchAccount)?;

        let issued = IssuedToken::new(Utc::now(), Duration::hours(RESET_TOKEN_TTL_HOURS));
        self.accounts
            .set_reset_token(account.id, &issued.token, issued.expires_at)
            .await?;
        tracing::info!(account_id = %account.id, "reset token issued");

        let link = reset_link(&self.portal_base, &issued.token);
        let message = reset_email(&account.display_name(), &account.email, &link);
        deliver(&self.notifier, &message, NotifyPolicy::Propagate).await
    }
}

// ── ConsumeReset ─────────────────────────────────────────────────────────────

pub struct ConsumeResetInput {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

pub struct ConsumeResetUseCase<A: AccountRepository> {
    pub accounts: A,
    pub hasher: PasswordHasher,
}

impl<A: AccountRepository> ConsumeResetUseCase<A> {
    /// Input is validated before the token is looked at, so a rejected
    /// request leaves the token usable.
    pub async fn execute(&self, input: ConsumeResetInput) -> Result<(), ApiError> {
        if input.password != input.confirm_password {
            return Err(ApiError::validation("Passwords do not match."));
        }
        check_password_policy(&input.password).map_err(|e| ApiError::validation(e.to_string()))?;

        let account = self
            .accounts
            .find_by_reset_token(&input.token)
            .await?
            .ok_or(ApiError::InvalidToken)?;

        let now = Utc::now();
        if account.reset_token_expires_at.is_some_and(|exp| now > exp) {
            return Err(ApiError::TokenExpired);
        }

        let hash = self.hasher.hash(&input.password);
        // A concurrent consumer may have won between lookup and update.
        if !self
            .accounts
            .consume_reset_token(&input.token, &hash, now)
            .await?
        {
            return Err(ApiError::InvalidToken);
        }
        tracing::info!(account_id = %account.id, "password reset");
        Ok(())
    }
}

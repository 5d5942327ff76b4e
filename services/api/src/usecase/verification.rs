use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::repository::{AccountRepository, Notifier};
use crate::domain::types::{Account, NotifyPolicy, VERIFICATION_TOKEN_TTL_HOURS};
use crate::error::ApiError;
use crate::usecase::mail::{deliver, verification_email, verification_link};
use crate::usecase::token::IssuedToken;

/// Generate a verification token for `account`, persist it and email the link.
///
/// A new token always replaces the previous one. The token is persisted before
/// the email is attempted, so under [`NotifyPolicy::Swallow`] a delivery
/// failure still leaves a valid pending token.
pub async fn issue_verification<A, N>(
    accounts: &A,
    notifier: &N,
    portal_base: &str,
    account: &Account,
    policy: NotifyPolicy,
) -> Result<(), ApiError>
where
    A: AccountRepository,
    N: Notifier,
{
    if account.is_verified {
        return Err(ApiError::AlreadyVerified);
    }
    let issued = IssuedToken::new(Utc::now(), Duration::hours(VERIFICATION_TOKEN_TTL_HOURS));
    accounts
        .set_verification_token(account.id, &issued.token, issued.expires_at)
        .await?;
    tracing::info!(account_id = %account.id, "verification token issued");

    let link = verification_link(portal_base, &issued.token);
    let email = verification_email(&account.display_name(), &account.email, &link);
    deliver(notifier, &email, policy).await
}

// ── IssueVerification ────────────────────────────────────────────────────────

pub struct IssueVerificationUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    pub accounts: A,
    pub notifier: N,
    pub portal_base: String,
}

impl<A, N> IssueVerificationUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    pub async fn execute(&self, account_id: Uuid, policy: NotifyPolicy) -> Result<(), ApiError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)?;
        issue_verification(
            &self.accounts,
            &self.notifier,
            &self.portal_base,
            &account,
            policy,
        )
        .await
    }

    /// Resend entry point: resolve the account by email first.
    pub async fn execute_for_email(
        &self,
        email: &str,
        policy: NotifyPolicy,
    ) -> Result<(), ApiError> {
        let account = self
            .accounts
            .find_by_email(email.trim())
            .await?
            .ok_or(ApiError::AccountNotFound)?;
        issue_verification(
            &self.accounts,
            &self.notifier,
            &self.portal_base,
            &account,
            policy,
        )
        .await
    }
}

// ── ConsumeVerification ──────────────────────────────────────────────────────

/// Marks the token holder verified. The 24h expiry recorded at issuance is not
/// checked here; only reset tokens are rejected once expired.
pub struct ConsumeVerificationUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ConsumeVerificationUseCase<A> {
    pub async fn execute(&self, token: &str) -> Result<(), ApiError> {
        if token.is_empty() {
            return Err(ApiError::InvalidToken);
        }
        if !self.accounts.consume_verification_token(token).await? {
            return Err(ApiError::InvalidToken);
        }
        Ok(())
    }
}

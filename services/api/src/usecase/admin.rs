use uuid::Uuid;

use mol_domain::pagination::{Page, PageRequest};
use mol_domain::permission::{Action, Actor};
use mol_domain::validation::check_password_policy;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, AccountStatistics};
use crate::error::ApiError;
use crate::usecase::password::PasswordHasher;
use crate::usecase::require;

// ── ListAccounts ─────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ListAccountsUseCase<A> {
    pub async fn execute(&self, actor: &Actor, page: PageRequest) -> Result<Page<Account>, ApiError> {
        require(actor, Action::AdministerUsers)?;
        let count = self.accounts.count().await?;
        let window = page.resolve(count);
        let results = self.accounts.list(window).await?;
        Ok(Page::new(count, window, results))
    }
}

// ── GetAccountForAdmin ───────────────────────────────────────────────────────

/// How an administrator names the account to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AccountLookup {
    Email(String),
    Id(String),
}

impl AccountLookup {
    fn from_query(email: Option<String>, user_id: Option<String>) -> Result<Self, ApiError> {
        match (email, user_id) {
            (Some(email), None) => Ok(Self::Email(email)),
            (None, Some(id)) => Ok(Self::Id(id)),
            (Some(_), Some(_)) => Err(ApiError::validation(
                "Please provide either 'email' or 'user_id', not both",
            )),
            (None, None) => Err(ApiError::validation(
                "Please provide either 'email' or 'user_id' query parameter",
            )),
        }
    }
}

pub struct GetAccountForAdminUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAccountForAdminUseCase<A> {
    /// Look up by exactly one of `email` or `user_id`. An unparsable id is
    /// reported like an unknown one.
    pub async fn execute(
        &self,
        actor: &Actor,
        email: Option<String>,
        user_id: Option<String>,
    ) -> Result<Account, ApiError> {
        require(actor, Action::AdministerUsers)?;
        let found = match AccountLookup::from_query(email, user_id)? {
            AccountLookup::Email(email) => self.accounts.find_by_email(email.trim()).await?,
            AccountLookup::Id(id) => match Uuid::parse_str(id.trim()) {
                Ok(id) => self.accounts.find_by_id(id).await?,
                Err(_) => None,
            },
        };
        found.ok_or(ApiError::AccountNotFound)
    }
}

// ── SetAccountActive ─────────────────────────────────────────────────────────

pub struct SetAccountActiveUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> SetAccountActiveUseCase<A> {
    /// Block (`is_active = false`) or unblock an account.
    pub async fn execute(
        &self,
        actor: &Actor,
        account_id: Uuid,
        is_active: bool,
    ) -> Result<(), ApiError> {
        require(actor, Action::AdministerUsers)?;
        if !self.accounts.set_active(account_id, is_active).await? {
            return Err(ApiError::AccountNotFound);
        }
        tracing::info!(%account_id, is_active, admin_id = %actor.id, "account status changed");
        Ok(())
    }
}

// ── AdminSetPassword ─────────────────────────────────────────────────────────

pub struct AdminSetPasswordUseCase<A: AccountRepository> {
    pub accounts: A,
    pub hasher: PasswordHasher,
}

impl<A: AccountRepository> AdminSetPasswordUseCase<A> {
    /// Overwrite a user's password without knowing the current one.
    pub async fn execute(
        &self,
        actor: &Actor,
        account_id: Uuid,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), ApiError> {
        require(actor, Action::AdministerUsers)?;
        if new_password != confirm_password {
            return Err(ApiError::validation("Passwords do not match."));
        }
        check_password_policy(new_password).map_err(|e| ApiError::validation(e.to_string()))?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)?;
        let hash = self.hasher.hash(new_password);
        self.accounts.update_password(account.id, &hash).await?;
        tracing::info!(%account_id, admin_id = %actor.id, "password set by admin");
        Ok(())
    }
}

// ── AccountStatistics ────────────────────────────────────────────────────────

pub struct AccountStatisticsUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> AccountStatisticsUseCase<A> {
    pub async fn execute(&self, actor: &Actor) -> Result<AccountStatistics, ApiError> {
        require(actor, Action::AdministerUsers)?;
        self.accounts.statistics().await
    }
}

use chrono::{Duration, Utc};
use uuid::Uuid;

use mol_domain::role::Role;
use mol_domain::validation::{PASSWORD_MIN_LEN, check_password_policy};
use validator::ValidateEmail;

use crate::domain::repository::{AccountRepository, Notifier};
use crate::domain::types::{Account, NotifyPolicy, ProfilePatch};
use crate::error::ApiError;
use crate::usecase::password::PasswordHasher;
use crate::usecase::token::{AccessCredential, issue_access_token};
use crate::usecase::verification::issue_verification;

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
}

pub struct RegisterUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    pub accounts: A,
    pub notifier: N,
    pub hasher: PasswordHasher,
    pub portal_base: String,
}

impl<A, N> RegisterUseCase<A, N>
where
    A: AccountRepository,
    N: Notifier,
{
    /// Create a member account and send the first verification email.
    /// A failed email does not fail registration.
    pub async fn execute(&self, input: RegisterInput) -> Result<Account, ApiError> {
        let email = input.email.trim().to_owned();
        let username = input.username.trim().to_owned();

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailInUse);
        }
        if !username.is_empty() && self.accounts.find_by_username(&username).await?.is_some() {
            return Err(ApiError::UsernameInUse);
        }

        if !email.validate_email() {
            return Err(ApiError::validation("Enter a valid email address."));
        }
        if username.is_empty() {
            return Err(ApiError::validation("Username is required."));
        }
        if input.firstname.trim().is_empty() || input.lastname.trim().is_empty() {
            return Err(ApiError::validation("First name and last name are required."));
        }
        check_password_policy(&input.password).map_err(|e| ApiError::validation(e.to_string()))?;

        let account = Account {
            id: Uuid::now_v7(),
            email,
            username,
            password_hash: self.hasher.hash(&input.password),
            role: Some(Role::Member),
            firstname: input.firstname.trim().to_owned(),
            lastname: input.lastname.trim().to_owned(),
            middlename: non_blank(input.middlename),
            phonenumber: non_blank(input.phonenumber),
            is_active: true,
            is_verified: false,
            verification_token: None,
            verification_token_expires_at: None,
            reset_password_token: None,
            reset_token_expires_at: None,
            date_joined: Utc::now(),
            last_login: None,
        };
        self.accounts.create(&account).await?;
        tracing::info!(account_id = %account.id, "account registered");

        issue_verification(
            &self.accounts,
            &self.notifier,
            &self.portal_base,
            &account,
            NotifyPolicy::Swallow,
        )
        .await?;
        Ok(account)
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<A: AccountRepository> {
    pub accounts: A,
    pub hasher: PasswordHasher,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
}

impl<A: AccountRepository> AuthenticateUseCase<A> {
    /// `identifier` is tried as an email first, then as a username.
    ///
    /// An unknown identifier and a wrong password both yield
    /// [`ApiError::InvalidCredentials`].
    pub async fn execute(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AccessCredential, ApiError> {
        let identifier = identifier.trim();
        let account = match self.accounts.find_by_email(identifier).await? {
            Some(account) => Some(account),
            None => self.accounts.find_by_username(identifier).await?,
        };
        let account = account
            .filter(|a| self.hasher.verify(password, &a.password_hash))
            .ok_or(ApiError::InvalidCredentials)?;

        if !account.is_active {
            return Err(ApiError::AccountDisabled);
        }
        if !account.is_verified {
            return Err(ApiError::AccountNotVerified);
        }

        let now = Utc::now();
        let credential =
            issue_access_token(&account, &self.jwt_secret, self.access_token_ttl, now)?;
        self.accounts.record_login(account.id, now).await?;
        Ok(credential)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Authenticated password change. Pending reset tokens are left untouched.
pub struct ChangePasswordUseCase<A: AccountRepository> {
    pub accounts: A,
    pub hasher: PasswordHasher,
}

impl<A: AccountRepository> ChangePasswordUseCase<A> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        input: ChangePasswordInput,
    ) -> Result<(), ApiError> {
        if input.new_password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ApiError::validation(
                "Ensure this field has at least 8 characters.",
            ));
        }
        if input.new_password != input.confirm_new_password {
            return Err(ApiError::validation("New passwords do not match."));
        }

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)?;
        if !self
            .hasher
            .verify(&input.current_password, &account.password_hash)
        {
            return Err(ApiError::IncorrectPassword);
        }

        let hash = self.hasher.hash(&input.new_password);
        self.accounts.update_password(account.id, &hash).await
    }
}

// ── GetAccount ───────────────────────────────────────────────────────────────

pub struct GetAccountUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> GetAccountUseCase<A> {
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, ApiError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)
    }
}

// ── ResolveIdentity ──────────────────────────────────────────────────────────

pub struct ResolveIdentityUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ResolveIdentityUseCase<A> {
    /// Load the account behind a validated access credential. Deleted and
    /// blocked accounts are refused even while their credential is unexpired.
    pub async fn execute(&self, account_id: Uuid) -> Result<Account, ApiError> {
        match self.accounts.find_by_id(account_id).await? {
            Some(account) if account.is_active => Ok(account),
            Some(_) => {
                tracing::debug!(%account_id, "credential presented for blocked account");
                Err(ApiError::Unauthorized)
            }
            None => Err(ApiError::Unauthorized),
        }
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateProfileUseCase<A> {
    /// Apply a partial profile update and return the updated account.
    pub async fn execute(&self, account_id: Uuid, patch: ProfilePatch) -> Result<Account, ApiError> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&patch.firstname) || blank(&patch.lastname) {
            return Err(ApiError::validation("This field may not be blank."));
        }
        if !patch.is_empty() {
            self.accounts.update_profile(account_id, &patch).await?;
        }
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(ApiError::AccountNotFound)
    }
}

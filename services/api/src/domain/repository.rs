#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use mol_domain::pagination::PageWindow;

use crate::domain::types::{
    Account, AccountStatistics, BlogPost, BlogPostDraft, BlogPostPatch, ContactMessage, Course,
    CourseDraft, CoursePatch, NewContactMessage, NewsletterSubscription, OutgoingEmail,
    ProfilePatch, TeamMember, TeamMemberDraft, TeamMemberPatch,
};
use crate::error::ApiError;

/// Repository for accounts and their pending action tokens.
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, ApiError>;

    async fn create(&self, account: &Account) -> Result<(), ApiError>;

    /// Store a fresh verification token, replacing any previous one.
    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Atomically mark the holder of `token` verified and clear the token.
    /// Returns `false` if no account holds it.
    async fn consume_verification_token(&self, token: &str) -> Result<bool, ApiError>;

    /// Store a fresh reset token, replacing any previous one.
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, ApiError>;

    /// Atomically replace the password of the holder of `token` and clear the
    /// token, provided it has not expired at `now`. Returns `false` if nothing
    /// was updated.
    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError>;
    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError>;

    /// Returns `false` if the account does not exist.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, ApiError>;

    async fn count(&self) -> Result<u64, ApiError>;
    /// Newest `date_joined` first.
    async fn list(&self, window: PageWindow) -> Result<Vec<Account>, ApiError>;
    async fn statistics(&self) -> Result<AccountStatistics, ApiError>;
}

/// Repository for newsletter subscriptions.
pub trait NewsletterRepository: Send + Sync {
    async fn find_by_email(&self, email: &str)
    -> Result<Option<NewsletterSubscription>, ApiError>;
    async fn find_by_token(&self, token: &str)
    -> Result<Option<NewsletterSubscription>, ApiError>;
    async fn create(&self, email: &str, token: &str) -> Result<NewsletterSubscription, ApiError>;
    async fn set_token(&self, id: i32, token: &str) -> Result<(), ApiError>;

    /// Atomically mark the holder of `token` verified and clear the token.
    /// Returns `false` if no unverified subscription holds it.
    async fn consume_token(&self, token: &str) -> Result<bool, ApiError>;
}

pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, ApiError>;
}

pub trait CourseRepository: Send + Sync {
    async fn count(&self) -> Result<u64, ApiError>;
    /// Newest first.
    async fn list(&self, window: PageWindow) -> Result<Vec<Course>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ApiError>;
    async fn create(&self, draft: &CourseDraft) -> Result<Course, ApiError>;
    async fn update(&self, id: i32, patch: &CoursePatch) -> Result<Option<Course>, ApiError>;
    /// Returns `false` if the course does not exist.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

pub trait TeamMemberRepository: Send + Sync {
    async fn count(&self) -> Result<u64, ApiError>;
    /// Newest first.
    async fn list(&self, window: PageWindow) -> Result<Vec<TeamMember>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<TeamMember>, ApiError>;
    async fn create(&self, draft: &TeamMemberDraft) -> Result<TeamMember, ApiError>;
    async fn update(
        &self,
        id: i32,
        patch: &TeamMemberPatch,
    ) -> Result<Option<TeamMember>, ApiError>;
    /// Returns `false` if the member does not exist.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

pub trait BlogPostRepository: Send + Sync {
    async fn count(&self) -> Result<u64, ApiError>;
    /// Newest first.
    async fn list(&self, window: PageWindow) -> Result<Vec<BlogPost>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, ApiError>;
    async fn create(&self, draft: &BlogPostDraft) -> Result<BlogPost, ApiError>;
    async fn update(&self, id: i32, patch: &BlogPostPatch) -> Result<Option<BlogPost>, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Port for outbound email delivery. One attempt, no retry.
pub trait Notifier: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiError>;
}

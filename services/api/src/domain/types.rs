use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use mol_domain::role::Role;

/// Length of emailed action tokens (verification, reset, newsletter).
pub const ACTION_TOKEN_LEN: usize = 64;

/// Account verification token lifetime in hours.
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Password reset token lifetime in hours.
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Registered account, including pending action tokens.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Option<Role>,
    pub firstname: String,
    pub lastname: String,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verification_token_expires_at: Option<DateTime<Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Account {
    /// `firstname [middlename] lastname`, or the email when no name parts are set.
    pub fn display_name(&self) -> String {
        display_name(
            &self.firstname,
            self.middlename.as_deref(),
            &self.lastname,
            &self.email,
        )
    }
}

pub fn display_name(firstname: &str, middlename: Option<&str>, lastname: &str, email: &str) -> String {
    let parts: Vec<&str> = [Some(firstname), middlename, Some(lastname)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        email.to_owned()
    } else {
        parts.join(" ")
    }
}

/// Partial update of the profile fields on an account. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.lastname.is_none()
            && self.middlename.is_none()
            && self.phonenumber.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountStatistics {
    pub total_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub verified_users: u64,
}

#[derive(Debug, Clone)]
pub struct NewsletterSubscription {
    pub id: i32,
    pub email: String,
    pub verification_token: Option<String>,
    pub is_verified: bool,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: i32,
    pub full_name: String,
    pub occupation: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TeamMemberDraft {
    pub full_name: String,
    pub occupation: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeamMemberPatch {
    pub full_name: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Blog post joined with its author's display name.
#[derive(Debug, Clone)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub created_by: Uuid,
    pub creator_fullname: String,
    pub date_uploaded: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct BlogPostDraft {
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Email recipient, in the mail relay's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

/// A rendered email ready for the [`Notifier`](crate::domain::repository::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub subject: String,
    /// HTML body.
    pub body: String,
    pub to: Vec<Recipient>,
}

/// What to do when the notifier fails after the state change has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Log and report success to the caller.
    Swallow,
    /// Surface the failure as an internal error.
    Propagate,
}

use axum::extract::FromRef;
use chrono::Duration;
use sea_orm::DatabaseConnection;

use mol_auth_types::identity::JwtSecret;

use crate::domain::types::Recipient;
use crate::infra::db::{
    DbAccountRepository, DbBlogPostRepository, DbContactRepository, DbCourseRepository,
    DbNewsletterRepository, DbTeamMemberRepository,
};
use crate::infra::mail::HttpNotifier;
use crate::usecase::password::PasswordHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    /// Portal base URL without a trailing slash.
    pub portal_base: String,
    pub hasher: PasswordHasher,
    pub notifier: HttpNotifier,
    pub contact_recipient: Recipient,
    pub access_token_ttl: Duration,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn newsletter_repo(&self) -> DbNewsletterRepository {
        DbNewsletterRepository {
            db: self.db.clone(),
        }
    }

    pub fn contact_repo(&self) -> DbContactRepository {
        DbContactRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn team_repo(&self) -> DbTeamMemberRepository {
        DbTeamMemberRepository {
            db: self.db.clone(),
        }
    }

    pub fn blog_repo(&self) -> DbBlogPostRepository {
        DbBlogPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn notifier(&self) -> HttpNotifier {
        self.notifier.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        JwtSecret(state.jwt_secret.clone())
    }
}

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use mol_api_schema::{
    accounts, blog_posts, contact_messages, courses, newsletters, team_members,
};
use mol_domain::pagination::PageWindow;
use mol_domain::role::Role;

use crate::domain::repository::{
    AccountRepository, BlogPostRepository, ContactRepository, CourseRepository,
    NewsletterRepository, TeamMemberRepository,
};
use crate::domain::types::{
    Account, AccountStatistics, BlogPost, BlogPostDraft, BlogPostPatch, ContactMessage, Course,
    CourseDraft, CoursePatch, NewContactMessage, NewsletterSubscription, ProfilePatch,
    TeamMember, TeamMemberDraft, TeamMemberPatch, display_name,
};
use crate::error::ApiError;

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find account by username")?;
        Ok(model.map(account_from_model))
    }

    async fn create(&self, account: &Account) -> Result<(), ApiError> {
        accounts::ActiveModel {
            id: Set(account.id),
            email: Set(account.email.clone()),
            username: Set(account.username.clone()),
            password_hash: Set(account.password_hash.clone()),
            role: Set(account.role.map(|r| r.as_str().to_owned())),
            firstname: Set(account.firstname.clone()),
            lastname: Set(account.lastname.clone()),
            middlename: Set(account.middlename.clone()),
            phonenumber: Set(account.phonenumber.clone()),
            is_active: Set(account.is_active),
            is_verified: Set(account.is_verified),
            verification_token: Set(account.verification_token.clone()),
            verification_token_expires_at: Set(account.verification_token_expires_at),
            reset_password_token: Set(account.reset_password_token.clone()),
            reset_token_expires_at: Set(account.reset_token_expires_at),
            date_joined: Set(account.date_joined),
            last_login: Set(account.last_login),
        }
        .insert(&self.db)
        .await
        .context("create account")?;
        Ok(())
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                verification_token: Set(Some(token.to_owned())),
                verification_token_expires_at: Set(Some(expires_at)),
                ..Default::default()
            })
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set verification token")?;
        Ok(())
    }

    async fn consume_verification_token(&self, token: &str) -> Result<bool, ApiError> {
        let result = accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                is_verified: Set(true),
                verification_token: Set(None),
                verification_token_expires_at: Set(None),
                ..Default::default()
            })
            .filter(accounts::Column::VerificationToken.eq(token))
            .exec(&self.db)
            .await
            .context("consume verification token")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                reset_password_token: Set(Some(token.to_owned())),
                reset_token_expires_at: Set(Some(expires_at)),
                ..Default::default()
            })
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set reset token")?;
        Ok(())
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<Account>, ApiError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::ResetPasswordToken.eq(token))
            .one(&self.db)
            .await
            .context("find account by reset token")?;
        Ok(model.map(account_from_model))
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let result = accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                password_hash: Set(password_hash.to_owned()),
                reset_password_token: Set(None),
                reset_token_expires_at: Set(None),
                ..Default::default()
            })
            .filter(accounts::Column::ResetPasswordToken.eq(token))
            .filter(
                Condition::any()
                    .add(accounts::Column::ResetTokenExpiresAt.is_null())
                    .add(accounts::Column::ResetTokenExpiresAt.gte(now)),
            )
            .exec(&self.db)
            .await
            .context("consume reset token")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                password_hash: Set(password_hash.to_owned()),
                ..Default::default()
            })
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update password")?;
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError> {
        accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                last_login: Set(Some(at)),
                ..Default::default()
            })
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("record login")?;
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<(), ApiError> {
        let mut active = <accounts::ActiveModel as Default>::default();
        if let Some(firstname) = &patch.firstname {
            active.firstname = Set(firstname.trim().to_owned());
        }
        if let Some(lastname) = &patch.lastname {
            active.lastname = Set(lastname.trim().to_owned());
        }
        if let Some(middlename) = &patch.middlename {
            active.middlename = Set(non_blank(middlename));
        }
        if let Some(phonenumber) = &patch.phonenumber {
            active.phonenumber = Set(non_blank(phonenumber));
        }
        accounts::Entity::update_many()
            .set(active)
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update profile")?;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<bool, ApiError> {
        let result = accounts::Entity::update_many()
            .set(accounts::ActiveModel {
                is_active: Set(is_active),
                ..Default::default()
            })
            .filter(accounts::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set account active")?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ApiError> {
        let count = accounts::Entity::find()
            .count(&self.db)
            .await
            .context("count accounts")?;
        Ok(count)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Account>, ApiError> {
        let models = accounts::Entity::find()
            .order_by_desc(accounts::Column::DateJoined)
            .offset(window.offset)
            .limit(window.page_size)
            .all(&self.db)
            .await
            .context("list accounts")?;
        Ok(models.into_iter().map(account_from_model).collect())
    }

    async fn statistics(&self) -> Result<AccountStatistics, ApiError> {
        let total_users = accounts::Entity::find()
            .count(&self.db)
            .await
            .context("count accounts")?;
        let active_users = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .context("count active accounts")?;
        let verified_users = accounts::Entity::find()
            .filter(accounts::Column::IsVerified.eq(true))
            .count(&self.db)
            .await
            .context("count verified accounts")?;
        Ok(AccountStatistics {
            total_users,
            active_users,
            inactive_users: total_users.saturating_sub(active_users),
            verified_users,
        })
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    let role = model.role.as_deref().and_then(|r| match r.parse::<Role>() {
        Ok(role) => Some(role),
        Err(_) => {
            tracing::warn!(account_id = %model.id, role = r, "ignoring unknown stored role");
            None
        }
    });
    Account {
        id: model.id,
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        role,
        firstname: model.firstname,
        lastname: model.lastname,
        middlename: model.middlename,
        phonenumber: model.phonenumber,
        is_active: model.is_active,
        is_verified: model.is_verified,
        verification_token: model.verification_token,
        verification_token_expires_at: model.verification_token_expires_at,
        reset_password_token: model.reset_password_token,
        reset_token_expires_at: model.reset_token_expires_at,
        date_joined: model.date_joined,
        last_login: model.last_login,
    }
}

// ── Newsletter repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNewsletterRepository {
    pub db: DatabaseConnection,
}

impl NewsletterRepository for DbNewsletterRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, ApiError> {
        let model = newsletters::Entity::find()
            .filter(newsletters::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find subscription by email")?;
        Ok(model.map(subscription_from_model))
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<NewsletterSubscription>, ApiError> {
        let model = newsletters::Entity::find()
            .filter(newsletters::Column::VerificationToken.eq(token))
            .one(&self.db)
            .await
            .context("find subscription by token")?;
        Ok(model.map(subscription_from_model))
    }

    async fn create(&self, email: &str, token: &str) -> Result<NewsletterSubscription, ApiError> {
        let model = newsletters::ActiveModel {
            email: Set(email.to_owned()),
            verification_token: Set(Some(token.to_owned())),
            is_verified: Set(false),
            registration_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create subscription")?;
        Ok(subscription_from_model(model))
    }

    async fn set_token(&self, id: i32, token: &str) -> Result<(), ApiError> {
        newsletters::Entity::update_many()
            .set(newsletters::ActiveModel {
                verification_token: Set(Some(token.to_owned())),
                ..Default::default()
            })
            .filter(newsletters::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set subscription token")?;
        Ok(())
    }

    async fn consume_token(&self, token: &str) -> Result<bool, ApiError> {
        let result = newsletters::Entity::update_many()
            .set(newsletters::ActiveModel {
                is_verified: Set(true),
                verification_token: Set(None),
                ..Default::default()
            })
            .filter(newsletters::Column::VerificationToken.eq(token))
            .filter(newsletters::Column::IsVerified.eq(false))
            .exec(&self.db)
            .await
            .context("consume subscription token")?;
        Ok(result.rows_affected > 0)
    }
}

fn subscription_from_model(model: newsletters::Model) -> NewsletterSubscription {
    NewsletterSubscription {
        id: model.id,
        email: model.email,
        verification_token: model.verification_token,
        is_verified: model.is_verified,
        registration_date: model.registration_date,
    }
}

// ── Contact repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContactRepository {
    pub db: DatabaseConnection,
}

impl ContactRepository for DbContactRepository {
    async fn create(&self, message: &NewContactMessage) -> Result<ContactMessage, ApiError> {
        let model = contact_messages::ActiveModel {
            name: Set(message.name.clone()),
            email: Set(message.email.clone()),
            subject: Set(message.subject.clone()),
            message: Set(message.message.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create contact message")?;
        Ok(ContactMessage {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            message: model.message,
            created_at: model.created_at,
        })
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn count(&self) -> Result<u64, ApiError> {
        let count = courses::Entity::find()
            .count(&self.db)
            .await
            .context("count courses")?;
        Ok(count)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<Course>, ApiError> {
        let models = courses::Entity::find()
            .order_by_desc(courses::Column::CreatedAt)
            .order_by_desc(courses::Column::Id)
            .offset(window.offset)
            .limit(window.page_size)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ApiError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn create(&self, draft: &CourseDraft) -> Result<Course, ApiError> {
        let now = Utc::now();
        let model = courses::ActiveModel {
            title: Set(draft.title.trim().to_owned()),
            description: Set(draft.description.clone()),
            url: Set(draft.url.clone()),
            thumbnail_url: Set(draft.thumbnail_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create course")?;
        Ok(course_from_model(model))
    }

    async fn update(&self, id: i32, patch: &CoursePatch) -> Result<Option<Course>, ApiError> {
        let Some(model) = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course for update")?
        else {
            return Ok(None);
        };
        let mut active = model.into_active_model();
        if let Some(title) = &patch.title {
            active.title = Set(title.trim().to_owned());
        }
        if let Some(description) = &patch.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(url) = &patch.url {
            active.url = Set(Some(url.clone()));
        }
        if let Some(thumbnail_url) = &patch.thumbnail_url {
            active.thumbnail_url = Set(Some(thumbnail_url.clone()));
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update course")?;
        Ok(Some(course_from_model(model)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = courses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete course")?;
        Ok(result.rows_affected > 0)
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        title: model.title,
        description: model.description,
        url: model.url,
        thumbnail_url: model.thumbnail_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Team member repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamMemberRepository {
    pub db: DatabaseConnection,
}

impl TeamMemberRepository for DbTeamMemberRepository {
    async fn count(&self) -> Result<u64, ApiError> {
        let count = team_members::Entity::find()
            .count(&self.db)
            .await
            .context("count team members")?;
        Ok(count)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<TeamMember>, ApiError> {
        let models = team_members::Entity::find()
            .order_by_desc(team_members::Column::CreatedAt)
            .order_by_desc(team_members::Column::Id)
            .offset(window.offset)
            .limit(window.page_size)
            .all(&self.db)
            .await
            .context("list team members")?;
        Ok(models.into_iter().map(team_member_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<TeamMember>, ApiError> {
        let model = team_members::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team member by id")?;
        Ok(model.map(team_member_from_model))
    }

    async fn create(&self, draft: &TeamMemberDraft) -> Result<TeamMember, ApiError> {
        let now = Utc::now();
        let model = team_members::ActiveModel {
            full_name: Set(draft.full_name.trim().to_owned()),
            occupation: Set(draft.occupation.trim().to_owned()),
            bio: Set(draft.bio.clone()),
            avatar_url: Set(draft.avatar_url.clone()),
            email_url: Set(draft.email_url.clone()),
            linkedin_url: Set(draft.linkedin_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create team member")?;
        Ok(team_member_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        patch: &TeamMemberPatch,
    ) -> Result<Option<TeamMember>, ApiError> {
        let Some(model) = team_members::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team member for update")?
        else {
            return Ok(None);
        };
        let mut active = model.into_active_model();
        if let Some(full_name) = &patch.full_name {
            active.full_name = Set(full_name.trim().to_owned());
        }
        if let Some(occupation) = &patch.occupation {
            active.occupation = Set(occupation.trim().to_owned());
        }
        if let Some(bio) = &patch.bio {
            active.bio = Set(Some(bio.clone()));
        }
        if let Some(avatar_url) = &patch.avatar_url {
            active.avatar_url = Set(Some(avatar_url.clone()));
        }
        if let Some(email_url) = &patch.email_url {
            active.email_url = Set(Some(email_url.clone()));
        }
        if let Some(linkedin_url) = &patch.linkedin_url {
            active.linkedin_url = Set(Some(linkedin_url.clone()));
        }
        active.updated_at = Set(Utc::now());
        let model = active
            .update(&self.db)
            .await
            .context("update team member")?;
        Ok(Some(team_member_from_model(model)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = team_members::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete team member")?;
        Ok(result.rows_affected > 0)
    }
}

fn team_member_from_model(model: team_members::Model) -> TeamMember {
    TeamMember {
        id: model.id,
        full_name: model.full_name,
        occupation: model.occupation,
        bio: model.bio,
        avatar_url: model.avatar_url,
        email_url: model.email_url,
        linkedin_url: model.linkedin_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Blog post repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBlogPostRepository {
    pub db: DatabaseConnection,
}

impl BlogPostRepository for DbBlogPostRepository {
    async fn count(&self) -> Result<u64, ApiError> {
        let count = blog_posts::Entity::find()
            .count(&self.db)
            .await
            .context("count blog posts")?;
        Ok(count)
    }

    async fn list(&self, window: PageWindow) -> Result<Vec<BlogPost>, ApiError> {
        let rows = blog_posts::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_desc(blog_posts::Column::DateUploaded)
            .order_by_desc(blog_posts::Column::Id)
            .offset(window.offset)
            .limit(window.page_size)
            .all(&self.db)
            .await
            .context("list blog posts")?;
        Ok(rows
            .into_iter()
            .map(|(post, author)| blog_post_from_model(post, author))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, ApiError> {
        let row = blog_posts::Entity::find_by_id(id)
            .find_also_related(accounts::Entity)
            .one(&self.db)
            .await
            .context("find blog post by id")?;
        Ok(row.map(|(post, author)| blog_post_from_model(post, author)))
    }

    async fn create(&self, draft: &BlogPostDraft) -> Result<BlogPost, ApiError> {
        let now = Utc::now();
        let model = blog_posts::ActiveModel {
            title: Set(draft.title.trim().to_owned()),
            description: Set(draft.description.clone()),
            body: Set(draft.body.clone()),
            thumbnail_url: Set(draft.thumbnail_url.clone()),
            created_by: Set(draft.created_by),
            date_uploaded: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create blog post")?;
        let author = accounts::Entity::find_by_id(model.created_by)
            .one(&self.db)
            .await
            .context("find blog post author")?;
        Ok(blog_post_from_model(model, author))
    }

    async fn update(&self, id: i32, patch: &BlogPostPatch) -> Result<Option<BlogPost>, ApiError> {
        let Some((model, author)) = blog_posts::Entity::find_by_id(id)
            .find_also_related(accounts::Entity)
            .one(&self.db)
            .await
            .context("find blog post for update")?
        else {
            return Ok(None);
        };
        let mut active = model.into_active_model();
        if let Some(title) = &patch.title {
            active.title = Set(title.trim().to_owned());
        }
        if let Some(description) = &patch.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(body) = &patch.body {
            active.body = Set(body.clone());
        }
        if let Some(thumbnail_url) = &patch.thumbnail_url {
            active.thumbnail_url = Set(Some(thumbnail_url.clone()));
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update blog post")?;
        Ok(Some(blog_post_from_model(model, author)))
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let result = blog_posts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete blog post")?;
        Ok(result.rows_affected > 0)
    }
}

fn blog_post_from_model(model: blog_posts::Model, author: Option<accounts::Model>) -> BlogPost {
    let creator_fullname = author
        .map(|a| display_name(&a.firstname, a.middlename.as_deref(), &a.lastname, &a.email))
        .unwrap_or_default();
    BlogPost {
        id: model.id,
        title: model.title,
        description: model.description,
        body: model.body,
        thumbnail_url: model.thumbnail_url,
        created_by: model.created_by,
        creator_fullname,
        date_uploaded: model.date_uploaded,
        updated_at: model.updated_at,
    }
}

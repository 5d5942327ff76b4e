use sea_orm::entity::prelude::*;

/// Account with credentials, profile fields and pending action tokens.
///
/// Each action token owns its own expiry column; consuming a token clears
/// both the token and its expiry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    /// `member` / `writer` / `admin`, or NULL for no privileges.
    pub role: Option<String>,
    pub firstname: String,
    pub lastname: String,
    pub middlename: Option<String>,
    pub phonenumber: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub verification_token: Option<String>,
    pub verification_token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog_posts::Entity")]
    BlogPosts,
}

impl Related<super::blog_posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlogPosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use mol_domain::pagination::{Page, PageQuery};

use crate::domain::types::{BlogPost, BlogPostPatch};
use crate::error::ApiError;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::blog::{
    CreateBlogPostInput, CreateBlogPostUseCase, DeleteBlogPostUseCase, GetBlogPostUseCase,
    ListBlogPostsUseCase, UpdateBlogPostUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BlogPostResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub thumbnail_url: Option<String>,
    pub created_by: uuid::Uuid,
    pub creator_fullname: String,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub date_uploaded: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BlogPost> for BlogPostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            body: post.body,
            thumbnail_url: post.thumbnail_url,
            created_by: post.created_by,
            creator_fullname: post.creator_fullname,
            date_uploaded: post.date_uploaded,
            updated_at: post.updated_at,
        }
    }
}

// ── GET /api/blog/ ───────────────────────────────────────────────────────────

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<BlogPostResponse>>, ApiError> {
    let usecase = ListBlogPostsUseCase {
        repo: state.blog_repo(),
    };
    let page = usecase.execute(query.into()).await?;
    Ok(Json(page.map(BlogPostResponse::from)))
}

// ── GET /api/blog/{id}/ ──────────────────────────────────────────────────────

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let usecase = GetBlogPostUseCase {
        repo: state.blog_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/blog/create/ ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub body: String,
    pub thumbnail_url: Option<String>,
}

pub async fn create_post(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<BlogPostResponse>), ApiError> {
    let usecase = CreateBlogPostUseCase {
        repo: state.blog_repo(),
    };
    let post = usecase
        .execute(
            &identity.actor(),
            CreateBlogPostInput {
                title: body.title,
                description: body.description,
                body: body.body,
                thumbnail_url: body.thumbnail_url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

// ── PUT /api/blog/{id}/update/ ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub async fn update_post(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdatePostRequest>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let usecase = UpdateBlogPostUseCase {
        repo: state.blog_repo(),
    };
    let post = usecase
        .execute(
            &identity.actor(),
            id,
            BlogPostPatch {
                title: body.title,
                description: body.description,
                body: body.body,
                thumbnail_url: body.thumbnail_url,
            },
        )
        .await?;
    Ok(Json(post.into()))
}

// ── DELETE /api/blog/{id}/delete/ ────────────────────────────────────────────

pub async fn delete_post(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteBlogPostUseCase {
        repo: state.blog_repo(),
    };
    usecase.execute(&identity.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

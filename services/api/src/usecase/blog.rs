use mol_domain::pagination::{Page, PageRequest};
use mol_domain::permission::{Action, Actor};

use crate::domain::repository::BlogPostRepository;
use crate::domain::types::{BlogPost, BlogPostDraft, BlogPostPatch};
use crate::error::ApiError;
use crate::usecase::require;

const TITLE_MAX_LEN: usize = 255;

fn check_title(title: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::validation("Title is required."));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ApiError::validation(
            "Ensure title has no more than 255 characters.",
        ));
    }
    Ok(())
}

// ── ListBlogPosts ────────────────────────────────────────────────────────────

pub struct ListBlogPostsUseCase<R: BlogPostRepository> {
    pub repo: R,
}

impl<R: BlogPostRepository> ListBlogPostsUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<BlogPost>, ApiError> {
        let count = self.repo.count().await?;
        let window = page.resolve(count);
        let results = self.repo.list(window).await?;
        Ok(Page::new(count, window, results))
    }
}

// ── GetBlogPost ──────────────────────────────────────────────────────────────

pub struct GetBlogPostUseCase<R: BlogPostRepository> {
    pub repo: R,
}

impl<R: BlogPostRepository> GetBlogPostUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<BlogPost, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BlogPostNotFound)
    }
}

// ── CreateBlogPost ───────────────────────────────────────────────────────────

pub struct CreateBlogPostInput {
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub thumbnail_url: Option<String>,
}

pub struct CreateBlogPostUseCase<R: BlogPostRepository> {
    pub repo: R,
}

impl<R: BlogPostRepository> CreateBlogPostUseCase<R> {
    /// The post is always attributed to `actor`.
    pub async fn execute(
        &self,
        actor: &Actor,
        input: CreateBlogPostInput,
    ) -> Result<BlogPost, ApiError> {
        require(actor, Action::CreateBlogPost)?;
        check_title(&input.title)?;
        if input.body.trim().is_empty() {
            return Err(ApiError::validation("Body is required."));
        }
        let draft = BlogPostDraft {
            title: input.title,
            description: input.description,
            body: input.body,
            thumbnail_url: input.thumbnail_url,
            created_by: actor.id,
        };
        let post = self.repo.create(&draft).await?;
        tracing::info!(post_id = post.id, author_id = %actor.id, "blog post created");
        Ok(post)
    }
}

// ── UpdateBlogPost ───────────────────────────────────────────────────────────

pub struct UpdateBlogPostUseCase<R: BlogPostRepository> {
    pub repo: R,
}

impl<R: BlogPostRepository> UpdateBlogPostUseCase<R> {
    /// Writers may only edit their own posts. A missing post is reported
    /// before the ownership check.
    pub async fn execute(
        &self,
        actor: &Actor,
        id: i32,
        patch: BlogPostPatch,
    ) -> Result<BlogPost, ApiError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BlogPostNotFound)?;
        require(
            actor,
            Action::EditBlogPost {
                author_id: post.created_by,
            },
        )?;
        if let Some(title) = &patch.title {
            check_title(title)?;
        }
        if patch.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(ApiError::validation("Body may not be blank."));
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(ApiError::BlogPostNotFound)
    }
}

// ── DeleteBlogPost ───────────────────────────────────────────────────────────

pub struct DeleteBlogPostUseCase<R: BlogPostRepository> {
    pub repo: R,
}

impl<R: BlogPostRepository> DeleteBlogPostUseCase<R> {
    pub async fn execute(&self, actor: &Actor, id: i32) -> Result<(), ApiError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::BlogPostNotFound)?;
        require(
            actor,
            Action::DeleteBlogPost {
                author_id: post.created_by,
            },
        )?;
        if !self.repo.delete(id).await? {
            return Err(ApiError::BlogPostNotFound);
        }
        tracing::info!(post_id = id, actor_id = %actor.id, "blog post deleted");
        Ok(())
    }
}

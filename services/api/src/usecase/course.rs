use mol_domain::pagination::{Page, PageRequest};
use mol_domain::permission::{Action, Actor};

use crate::domain::repository::CourseRepository;
use crate::domain::types::{Course, CourseDraft, CoursePatch};
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

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCoursesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<Course>, ApiError> {
        let count = self.repo.count().await?;
        let window = page.resolve(count);
        let results = self.repo.list(window).await?;
        Ok(Page::new(count, window, results))
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Course, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CourseNotFound)
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CreateCourseUseCase<R> {
    pub async fn execute(&self, actor: &Actor, draft: CourseDraft) -> Result<Course, ApiError> {
        require(actor, Action::ManageCourses)?;
        check_title(&draft.title)?;
        self.repo.create(&draft).await
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: i32,
        patch: CoursePatch,
    ) -> Result<Course, ApiError> {
        require(actor, Action::ManageCourses)?;
        if let Some(title) = &patch.title {
            check_title(title)?;
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(ApiError::CourseNotFound)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> DeleteCourseUseCase<R> {
    pub async fn execute(&self, actor: &Actor, id: i32) -> Result<(), ApiError> {
        require(actor, Action::ManageCourses)?;
        if !self.repo.delete(id).await? {
            return Err(ApiError::CourseNotFound);
        }
        Ok(())
    }
}

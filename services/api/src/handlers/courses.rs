use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use mol_domain::pagination::{Page, PageQuery};

use crate::domain::types::{Course, CourseDraft, CoursePatch};
use crate::error::ApiError;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase, ListCoursesUseCase,
    UpdateCourseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            url: course.url,
            thumbnail_url: course.thumbnail_url,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ── GET /api/course/ ─────────────────────────────────────────────────────────

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<CourseResponse>>, ApiError> {
    let usecase = ListCoursesUseCase {
        repo: state.course_repo(),
    };
    let page = usecase.execute(query.into()).await?;
    Ok(Json(page.map(CourseResponse::from)))
}

// ── GET /api/course/{id}/ ────────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = GetCourseUseCase {
        repo: state.course_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/course/create/ ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub async fn create_course(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            &identity.actor(),
            CourseDraft {
                title: body.title,
                description: body.description,
                url: body.url,
                thumbnail_url: body.thumbnail_url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PUT /api/course/{id}/update/ ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub async fn update_course(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            &identity.actor(),
            id,
            CoursePatch {
                title: body.title,
                description: body.description,
                url: body.url,
                thumbnail_url: body.thumbnail_url,
            },
        )
        .await?;
    Ok(Json(course.into()))
}

// ── DELETE /api/course/{id}/delete/ ──────────────────────────────────────────

pub async fn delete_course(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCourseUseCase {
        repo: state.course_repo(),
    };
    usecase.execute(&identity.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

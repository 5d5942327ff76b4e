use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use mol_domain::pagination::{Page, PageQuery};

use crate::domain::types::{TeamMember, TeamMemberDraft, TeamMemberPatch};
use crate::error::ApiError;
use crate::identity::ActiveIdentity;
use crate::state::AppState;
use crate::usecase::team::{
    CreateTeamMemberUseCase, DeleteTeamMemberUseCase, GetTeamMemberUseCase,
    ListTeamMembersUseCase, UpdateTeamMemberUseCase,
};

#[derive(Serialize)]
pub struct TeamMemberResponse {
    pub id: i32,
    pub full_name: String,
    pub occupation: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "mol_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TeamMember> for TeamMemberResponse {
    fn from(member: TeamMember) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name,
            occupation: member.occupation,
            bio: member.bio,
            avatar_url: member.avatar_url,
            email_url: member.email_url,
            linkedin_url: member.linkedin_url,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

// ── GET /api/team/ ───────────────────────────────────────────────────────────

pub async fn list_team(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<TeamMemberResponse>>, ApiError> {
    let usecase = ListTeamMembersUseCase {
        repo: state.team_repo(),
    };
    let page = usecase.execute(query.into()).await?;
    Ok(Json(page.map(TeamMemberResponse::from)))
}

// ── GET /api/team/{id}/ ──────────────────────────────────────────────────────

pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TeamMemberResponse>, ApiError> {
    let usecase = GetTeamMemberUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/team/create/ ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeamMemberRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub occupation: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
}

pub async fn create_team_member(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMemberResponse>), ApiError> {
    let usecase = CreateTeamMemberUseCase {
        repo: state.team_repo(),
    };
    let member = usecase
        .execute(
            &identity.actor(),
            TeamMemberDraft {
                full_name: body.full_name,
                occupation: body.occupation,
                bio: body.bio,
                avatar_url: body.avatar_url,
                email_url: body.email_url,
                linkedin_url: body.linkedin_url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

// ── PUT /api/team/{id}/update/ ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTeamMemberRequest {
    pub full_name: Option<String>,
    pub occupation: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub email_url: Option<String>,
    pub linkedin_url: Option<String>,
}

pub async fn update_team_member(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMemberResponse>, ApiError> {
    let usecase = UpdateTeamMemberUseCase {
        repo: state.team_repo(),
    };
    let member = usecase
        .execute(
            &identity.actor(),
            id,
            TeamMemberPatch {
                full_name: body.full_name,
                occupation: body.occupation,
                bio: body.bio,
                avatar_url: body.avatar_url,
                email_url: body.email_url,
                linkedin_url: body.linkedin_url,
            },
        )
        .await?;
    Ok(Json(member.into()))
}

// ── DELETE /api/team/{id}/delete/ ────────────────────────────────────────────

pub async fn delete_team_member(
    identity: ActiveIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteTeamMemberUseCase {
        repo: state.team_repo(),
    };
    usecase.execute(&identity.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

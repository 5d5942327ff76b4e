use mol_domain::pagination::{Page, PageRequest};
use mol_domain::permission::{Action, Actor};
use validator::ValidateEmail;

use crate::domain::repository::TeamMemberRepository;
use crate::domain::types::{TeamMember, TeamMemberDraft, TeamMemberPatch};
use crate::error::ApiError;
use crate::usecase::require;

const NAME_MAX_LEN: usize = 255;

fn check_required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required.")));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(ApiError::validation(format!(
            "Ensure {field} has no more than 255 characters."
        )));
    }
    Ok(())
}

/// A blank contact address is allowed.
fn check_contact(email_url: Option<&str>) -> Result<(), ApiError> {
    match email_url {
        Some(email) if !email.trim().is_empty() && !email.validate_email() => {
            Err(ApiError::validation("Enter a valid email address."))
        }
        _ => Ok(()),
    }
}

// ── ListTeamMembers ──────────────────────────────────────────────────────────

pub struct ListTeamMembersUseCase<R: TeamMemberRepository> {
    pub repo: R,
}

impl<R: TeamMemberRepository> ListTeamMembersUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<TeamMember>, ApiError> {
        let count = self.repo.count().await?;
        let window = page.resolve(count);
        let results = self.repo.list(window).await?;
        Ok(Page::new(count, window, results))
    }
}

// ── GetTeamMember ────────────────────────────────────────────────────────────

pub struct GetTeamMemberUseCase<R: TeamMemberRepository> {
    pub repo: R,
}

impl<R: TeamMemberRepository> GetTeamMemberUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<TeamMember, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TeamMemberNotFound)
    }
}

// ── CreateTeamMember ─────────────────────────────────────────────────────────

pub struct CreateTeamMemberUseCase<R: TeamMemberRepository> {
    pub repo: R,
}

impl<R: TeamMemberRepository> CreateTeamMemberUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, ApiError> {
        require(actor, Action::ManageTeam)?;
        check_required("full_name", &draft.full_name)?;
        check_required("occupation", &draft.occupation)?;
        check_contact(draft.email_url.as_deref())?;
        let member = self.repo.create(&draft).await?;
        tracing::info!(member_id = member.id, admin_id = %actor.id, "team member added");
        Ok(member)
    }
}

// ── UpdateTeamMember ─────────────────────────────────────────────────────────

pub struct UpdateTeamMemberUseCase<R: TeamMemberRepository> {
    pub repo: R,
}

impl<R: TeamMemberRepository> UpdateTeamMemberUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Actor,
        id: i32,
        patch: TeamMemberPatch,
    ) -> Result<TeamMember, ApiError> {
        require(actor, Action::ManageTeam)?;
        if let Some(full_name) = &patch.full_name {
            check_required("full_name", full_name)?;
        }
        if let Some(occupation) = &patch.occupation {
            check_required("occupation", occupation)?;
        }
        check_contact(patch.email_url.as_deref())?;
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(ApiError::TeamMemberNotFound)
    }
}

// ── DeleteTeamMember ─────────────────────────────────────────────────────────

pub struct DeleteTeamMemberUseCase<R: TeamMemberRepository> {
    pub repo: R,
}

impl<R: TeamMemberRepository> DeleteTeamMemberUseCase<R> {
    pub async fn execute(&self, actor: &Actor, id: i32) -> Result<(), ApiError> {
        require(actor, Action::ManageTeam)?;
        if !self.repo.delete(id).await? {
            return Err(ApiError::TeamMemberNotFound);
        }
        Ok(())
    }
}

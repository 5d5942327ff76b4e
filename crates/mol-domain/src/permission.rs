//! Role-based capability checks.
//!
//! Every privileged handler asks [`authorize`] instead of comparing role names inline.

use uuid::Uuid;

use crate::role::Role;

/// The authenticated caller, as far as authorization is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Option<Role>,
}

/// A privileged operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageCourses,
    ManageTeam,
    CreateBlogPost,
    EditBlogPost { author_id: Uuid },
    DeleteBlogPost { author_id: Uuid },
    AdministerUsers,
}

/// Decide whether `actor` may perform `action`.
///
/// An actor without a role is allowed nothing; that is not an error.
pub fn authorize(actor: &Actor, action: Action) -> bool {
    match (actor.role, action) {
        (Some(Role::Admin), _) => true,
        (Some(Role::Writer), Action::CreateBlogPost) => true,
        (
            Some(Role::Writer),
            Action::EditBlogPost { author_id } | Action::DeleteBlogPost { author_id },
        ) => author_id == actor.id,
        _ => false,
    }
}

use mol_domain::permission::{Action, Actor, authorize};

use crate::error::ApiError;

pub mod account;
pub mod admin;
pub mod blog;
pub mod contact;
pub mod course;
pub mod mail;
pub mod newsletter;
pub mod password;
pub mod reset;
pub mod team;
pub mod token;
pub mod verification;

/// [`authorize`], lifted into the API error space.
pub(crate) fn require(actor: &Actor, action: Action) -> Result<(), ApiError> {
    if authorize(actor, action) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

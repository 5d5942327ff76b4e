use serde::Serialize;

pub mod accounts;
pub mod admin;
pub mod blog;
pub mod contact;
pub mod courses;
pub mod newsletter;
pub mod profile;
pub mod team;

/// `{"message": "..."}` acknowledgement body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> axum::Json<Self> {
        axum::Json(Self { message })
    }
}

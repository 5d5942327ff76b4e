use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::domain::types::NewContactMessage;
use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::contact::SubmitContactUseCase;

#[derive(Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let usecase = SubmitContactUseCase {
        repo: state.contact_repo(),
        notifier: state.notifier(),
        recipient: state.contact_recipient.clone(),
    };
    usecase
        .execute(NewContactMessage {
            name: body.name,
            email: body.email,
            subject: body.subject,
            message: body.message,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new(
            "Your message has been sent successfully. We will get back to you soon.",
        ),
    ))
}

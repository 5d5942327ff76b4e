use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::newsletter::{
    NewsletterRegistration, NewsletterVerification, RegisterNewsletterUseCase,
    VerifyNewsletterUseCase,
};

// ── POST /api/newsletter/register/ ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let usecase = RegisterNewsletterUseCase {
        repo: state.newsletter_repo(),
        notifier: state.notifier(),
        portal_base: state.portal_base.clone(),
    };
    const SENT: &str =
        "Verification email sent. Please check your inbox to verify your subscription.";
    let resp = match usecase.execute(&body.email).await? {
        NewsletterRegistration::Created => (StatusCode::CREATED, MessageResponse::new(SENT)),
        NewsletterRegistration::Resent => (StatusCode::OK, MessageResponse::new(SENT)),
        NewsletterRegistration::AlreadySubscribed => (
            StatusCode::OK,
            MessageResponse::new("This email is already subscribed to our newsletter."),
        ),
    };
    Ok(resp)
}

// ── GET|POST /api/newsletter/verify/{token}/ ─────────────────────────────────

pub async fn verify_subscription(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = VerifyNewsletterUseCase {
        repo: state.newsletter_repo(),
    };
    let message = match usecase.execute(&token).await? {
        NewsletterVerification::Verified => {
            "Email verified successfully. Welcome to our newsletter!"
        }
        NewsletterVerification::AlreadyVerified => "This email is already verified.",
    };
    Ok(MessageResponse::new(message))
}

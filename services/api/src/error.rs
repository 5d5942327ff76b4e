use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants.
///
/// Authentication failures carry generic messages; login never reveals whether
/// the identifier exists.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Reset token expired")]
    TokenExpired,
    #[error("{0}")]
    Validation(String),
    #[error("email already in use")]
    EmailInUse,
    #[error("username already in use")]
    UsernameInUse,
    #[error("User already verified")]
    AlreadyVerified,
    #[error("Current password is incorrect.")]
    IncorrectPassword,
    #[error("you do not have an account with us")]
    NoSuchAccount,
    #[error("User not found.")]
    AccountNotFound,
    #[error("Course not found.")]
    CourseNotFound,
    #[error("Blog post not found.")]
    BlogPostNotFound,
    #[error("Team member not found.")]
    TeamMemberNotFound,
    #[error("Wrong username or password")]
    InvalidCredentials,
    #[error("Account is disabled")]
    AccountDisabled,
    #[error("Account not verified")]
    AccountNotVerified,
    #[error("Authentication credentials were not provided or are invalid.")]
    Unauthorized,
    #[error("You do not have permission to perform this action.")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmailInUse => "EMAIL_IN_USE",
            Self::UsernameInUse => "USERNAME_IN_USE",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",
            Self::NoSuchAccount => "NO_SUCH_ACCOUNT",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::BlogPostNotFound => "BLOG_POST_NOT_FOUND",
            Self::TeamMemberNotFound => "TEAM_MEMBER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidToken
            | Self::TokenExpired
            | Self::Validation(_)
            | Self::EmailInUse
            | Self::UsernameInUse
            | Self::AlreadyVerified
            | Self::IncorrectPassword => StatusCode::BAD_REQUEST,
            Self::NoSuchAccount
            | Self::AccountNotFound
            | Self::CourseNotFound
            | Self::BlogPostNotFound
            | Self::TeamMemberNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::AccountDisabled | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountNotVerified | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records every request; only 500s need the error chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::auth::{dto::MessageResponse, repo_types::StoreError};

/// Why a credential check failed. Never leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    WrongPassword,
}

impl CredentialFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownEmail => "unknown_email",
            Self::WrongPassword => "wrong_password",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials ({})", .0.as_str())]
    InvalidCredentials(CredentialFailure),
    #[error("user not found")]
    NotFound,
    #[error("persistence failure: {0:#}")]
    Persistence(anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing text; both credential failures share one message.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(msg) => *msg,
            Self::DuplicateEmail => "Email already registered",
            Self::InvalidCredentials(_) => "Invalid email or password",
            Self::NotFound => "User not found",
            Self::Persistence(_) => "Internal server error",
        }
    }

    pub(crate) fn persistence(e: impl Into<anyhow::Error>) -> Self {
        let e = e.into();
        error!(error = %format!("{e:#}"), "persistence failure");
        Self::Persistence(e)
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => Self::DuplicateEmail,
            StoreError::Database(e) => Self::persistence(e),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = MessageResponse::new(self.public_message());
        (self.status(), Json(body)).into_response()
    }
}

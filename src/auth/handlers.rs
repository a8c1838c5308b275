use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    auth::{
        audit::{AuditContext, AuditEvent, PasswordChangeFailure},
        dto::{
            ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, PublicUser,
            SignupRequest,
        },
        error::{AuthError, CredentialFailure},
        validation::{Credentials, PasswordChange},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/change-password", post(change_password))
}

/// Kept apart so the login limiter can wrap it alone.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    payload.map(|Json(v)| v).map_err(|e| {
        debug!(error = %e, "rejected request body");
        AuthError::Validation("Invalid request body")
    })
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ctx: AuditContext,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let creds = Credentials::try_from(body(payload)?)?;

    match state.credentials.register(&creds).await {
        Ok(user_id) => {
            state.audit.record(
                &ctx,
                &AuditEvent::SignupSucceeded {
                    user_id,
                    email: creds.email().to_owned(),
                },
            );
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("User registered successfully")),
            ))
        }
        Err(AuthError::DuplicateEmail) => {
            state.audit.record(
                &ctx,
                &AuditEvent::SignupDuplicate {
                    email: creds.email().to_owned(),
                },
            );
            Err(AuthError::DuplicateEmail)
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ctx: AuditContext,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let creds = Credentials::try_from(body(payload)?)?;

    match state.credentials.authenticate(&creds).await {
        Ok(user) => {
            state.audit.record(
                &ctx,
                &AuditEvent::LoginSucceeded {
                    user_id: user.id,
                    email: user.email.clone(),
                },
            );
            Ok(Json(LoginResponse {
                message: "Login successful".into(),
                user: PublicUser {
                    id: user.id,
                    email: user.email,
                },
            }))
        }
        Err(AuthError::InvalidCredentials(reason)) => {
            state.audit.record(
                &ctx,
                &AuditEvent::LoginFailed {
                    email: creds.email().to_owned(),
                    reason,
                },
            );
            Err(AuthError::InvalidCredentials(reason))
        }
        Err(e) => Err(e),
    }
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    ctx: AuditContext,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthError> {
    let change = PasswordChange::try_from(body(payload)?)?;
    let email = change.email().to_owned();

    let reason = match state.credentials.change_password(&change).await {
        Ok(()) => {
            state.audit.record(&ctx, &AuditEvent::PasswordChanged { email });
            return Ok(Json(MessageResponse::new("Password updated successfully")));
        }
        Err(AuthError::NotFound) => PasswordChangeFailure::UnknownEmail,
        Err(AuthError::InvalidCredentials(_)) => PasswordChangeFailure::WrongOldPassword,
        Err(e) => return Err(e),
    };

    state
        .audit
        .record(&ctx, &AuditEvent::PasswordChangeFailed { email, reason });
    Err(match reason {
        PasswordChangeFailure::UnknownEmail => AuthError::NotFound,
        PasswordChangeFailure::WrongOldPassword => {
            AuthError::InvalidCredentials(CredentialFailure::WrongPassword)
        }
    })
}

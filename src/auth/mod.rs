use crate::state::AppState;
use axum::Router;

pub mod audit;
pub mod dto;
pub mod error;
pub(crate) mod extractors;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod validation;

/// `/signup` and `/change-password`; `/login` is mounted separately in `app.rs`.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub email: String,                // exact, case-sensitive
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, stored in the `password` column
    pub created_at: OffsetDateTime,   // creation timestamp
}

/// Storage-layer failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

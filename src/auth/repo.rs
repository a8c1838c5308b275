use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{StoreError, User};

/// Persistence seam for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. A uniqueness conflict on `email` yields
    /// [`StoreError::DuplicateEmail`].
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    /// Replace the stored hash for `email`. Returns `false` when no row matched.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password AS password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password)
            VALUES ($1, $2)
            RETURNING id, email, password AS password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
            _ => StoreError::Database(e),
        })
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, StoreError> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET password = $2
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}

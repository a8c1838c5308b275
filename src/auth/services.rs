use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::auth::{
    error::{AuthError, CredentialFailure},
    password::{hash_password, verify_decoy, verify_password},
    repo::UserStore,
    repo_types::User,
    validation::{Credentials, PasswordChange},
};

/// Register, authenticate and change passwords against a [`UserStore`].
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a user and return its id. An existing email is
    /// [`AuthError::DuplicateEmail`], whether seen by the lookup or by the
    /// store's uniqueness constraint.
    pub async fn register(&self, creds: &Credentials) -> Result<Uuid, AuthError> {
        if self.store.find_by_email(creds.email()).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let hash = hash_password(creds.password().to_owned())
            .await
            .map_err(AuthError::persistence)?;

        let user = self.store.create(creds.email(), &hash).await?;
        debug!(user_id = %user.id, "user created");
        Ok(user.id)
    }

    /// Unknown email and wrong password both surface as
    /// [`AuthError::InvalidCredentials`], and both pay for one Argon2 verify.
    pub async fn authenticate(&self, creds: &Credentials) -> Result<User, AuthError> {
        let Some(user) = self.store.find_by_email(creds.email()).await? else {
            verify_decoy(creds.password().to_owned()).await;
            return Err(AuthError::InvalidCredentials(CredentialFailure::UnknownEmail));
        };

        if !self.check_password(creds.password(), &user).await? {
            return Err(AuthError::InvalidCredentials(CredentialFailure::WrongPassword));
        }
        Ok(user)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), AuthError> {
        let user = self
            .store
            .find_by_email(change.email())
            .await?
            .ok_or(AuthError::NotFound)?;

        if !self.check_password(change.old_password(), &user).await? {
            return Err(AuthError::InvalidCredentials(CredentialFailure::WrongPassword));
        }

        let hash = hash_password(change.new_password().to_owned())
            .await
            .map_err(AuthError::persistence)?;

        if !self.store.update_password(change.email(), &hash).await? {
            return Err(AuthError::NotFound);
        }
        debug!(user_id = %user.id, "password hash replaced");
        Ok(())
    }

    async fn check_password(&self, plain: &str, user: &User) -> Result<bool, AuthError> {
        // An unparsable stored hash is corrupt data, not a wrong password.
        verify_password(plain.to_owned(), user.password_hash.clone())
            .await
            .map_err(AuthError::persistence)
    }
}

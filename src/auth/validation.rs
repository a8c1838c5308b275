use std::fmt;

use crate::auth::{
    dto::{ChangePasswordRequest, LoginRequest, SignupRequest},
    error::AuthError,
};

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const CHANGE_FIELDS_REQUIRED: &str = "Email, old password and new password are required";

/// Non-empty email and password. Email is kept exactly as submitted.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: String, password: String) -> Result<Self, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(CREDENTIALS_REQUIRED));
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl TryFrom<SignupRequest> for Credentials {
    type Error = AuthError;

    fn try_from(req: SignupRequest) -> Result<Self, Self::Error> {
        Self::new(req.email, req.password)
    }
}

impl TryFrom<LoginRequest> for Credentials {
    type Error = AuthError;

    fn try_from(req: LoginRequest) -> Result<Self, Self::Error> {
        Self::new(req.email, req.password)
    }
}

#[derive(Clone)]
pub struct PasswordChange {
    email: String,
    old_password: String,
    new_password: String,
}

impl PasswordChange {
    pub fn new(email: String, old_password: String, new_password: String) -> Result<Self, AuthError> {
        if email.is_empty() || old_password.is_empty() || new_password.is_empty() {
            return Err(AuthError::Validation(CHANGE_FIELDS_REQUIRED));
        }
        Ok(Self {
            email,
            old_password,
            new_password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn old_password(&self) -> &str {
        &self.old_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl TryFrom<ChangePasswordRequest> for PasswordChange {
    type Error = AuthError;

    fn try_from(req: ChangePasswordRequest) -> Result<Self, Self::Error> {
        Self::new(req.email, req.old_password, req.new_password)
    }
}

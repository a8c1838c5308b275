//! Security audit trail for sign-up, login and password-change attempts.
//!
//! Events go through an [`AuditSink`]. The default sink writes `tracing`
//! events under the `audit` target, so any subscriber (stdout, JSON, a log
//! shipper) becomes the durable store.

use std::net::IpAddr;

use tracing::{info, warn};
use uuid::Uuid;

use super::error::CredentialFailure;

/// Who made the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditContext {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    SignupSucceeded { user_id: Uuid, email: String },
    /// Registration against an existing email; a hint of account enumeration.
    SignupDuplicate { email: String },
    LoginSucceeded { user_id: Uuid, email: String },
    LoginFailed { email: String, reason: CredentialFailure },
    PasswordChanged { email: String },
    PasswordChangeFailed { email: String, reason: PasswordChangeFailure },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChangeFailure {
    UnknownEmail,
    WrongOldPassword,
}

impl PasswordChangeFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownEmail => "unknown_email",
            Self::WrongOldPassword => "wrong_old_password",
        }
    }
}

impl AuditEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignupSucceeded { .. } => "signup",
            Self::SignupDuplicate { .. } => "signup_duplicate",
            Self::LoginSucceeded { .. } => "login",
            Self::LoginFailed { .. } => "login_failed",
            Self::PasswordChanged { .. } => "password_changed",
            Self::PasswordChangeFailed { .. } => "password_change_failed",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::SignupSucceeded { email, .. }
            | Self::SignupDuplicate { email }
            | Self::LoginSucceeded { email, .. }
            | Self::LoginFailed { email, .. }
            | Self::PasswordChanged { email }
            | Self::PasswordChangeFailed { email, .. } => email,
        }
    }

    /// Duplicates and failures are security-relevant.
    pub fn is_suspicious(&self) -> bool {
        matches!(
            self,
            Self::SignupDuplicate { .. }
                | Self::LoginFailed { .. }
                | Self::PasswordChangeFailed { .. }
        )
    }
}

pub trait AuditSink: Send + Sync {
    fn record(&self, ctx: &AuditContext, event: &AuditEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, ctx: &AuditContext, event: &AuditEvent) {
        let ip = ctx.ip.map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".into());
        let user_agent = ctx.user_agent.as_deref().unwrap_or("unknown");
        let user_id = match event {
            AuditEvent::SignupSucceeded { user_id, .. }
            | AuditEvent::LoginSucceeded { user_id, .. } => Some(user_id.to_string()),
            _ => None,
        };
        let reason = match event {
            AuditEvent::LoginFailed { reason, .. } => Some(reason.as_str()),
            AuditEvent::PasswordChangeFailed { reason, .. } => Some(reason.as_str()),
            _ => None,
        };

        if event.is_suspicious() {
            warn!(
                target: "audit",
                event = event.name(),
                email = %event.email(),
                %ip,
                user_agent,
                reason,
                "suspicious auth event"
            );
        } else {
            info!(
                target: "audit",
                event = event.name(),
                email = %event.email(),
                %ip,
                user_agent,
                user_id = user_id.as_deref(),
                "auth event"
            );
        }
    }
}

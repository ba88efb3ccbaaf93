//! Errors reported by the external auth service

use thiserror::Error;

/// Auth collaborator errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Session missing or expired")]
    SessionMissing,

    #[error("Auth service rejected the request: {0}")]
    Rejected(String),

    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::SessionMissing => "SESSION_MISSING",
            Self::Rejected(_) => "AUTH_REJECTED",
            Self::Unavailable(_) => "AUTH_UNAVAILABLE",
        }
    }

    /// Errors the user can fix by retyping the form
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::EmailNotConfirmed | Self::AlreadyRegistered
        )
    }
}

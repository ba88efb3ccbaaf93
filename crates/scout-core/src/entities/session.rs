//! Auth session issued by the external auth service

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UnitId;

/// Profile attributes attached to an auth account at sign-up
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileMetadata {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub unit_id: Option<UnitId>,
}

/// The authenticated identity inside a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub metadata: ProfileMetadata,
}

impl AuthUser {
    /// Part of the email before `@`, used when no name is on record
    pub fn email_local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

/// Session issued by the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Check if the session is expired at the given instant
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the session is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Notifications emitted by the auth service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Box<AuthSession>),
    SignedOut,
    TokenRefreshed(Box<AuthSession>),
}

impl AuthEvent {
    /// Short event name, mirrored in logged-out reason messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedIn(_) => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed(_) => "TOKEN_REFRESHED",
        }
    }
}

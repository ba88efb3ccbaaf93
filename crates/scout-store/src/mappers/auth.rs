//! Auth payload mappers

use chrono::{DateTime, Duration, Utc};
use scout_common::auth::profile_metadata_from;
use scout_core::entities::{AuthSession, AuthUser, ProfileMetadata};
use serde::Serialize;

use crate::models::{AuthUserRow, TokenResponse};

/// Lifetime assumed when the auth service does not say
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

impl From<AuthUserRow> for AuthUser {
    fn from(row: AuthUserRow) -> Self {
        Self {
            id: row.id,
            email: row.email.unwrap_or_default(),
            metadata: profile_metadata_from(&row.user_metadata),
        }
    }
}

/// Build a session from a token grant received at `now`
pub fn session_from_token_response(response: TokenResponse, now: DateTime<Utc>) -> AuthSession {
    let expires_at = response
        .expires_at
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .unwrap_or_else(|| {
            now + Duration::seconds(response.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
        });

    AuthSession {
        access_token: response.access_token,
        refresh_token: response.refresh_token,
        expires_at,
        user: AuthUser::from(response.user),
    }
}

/// Sign-up request body
#[derive(Debug, Serialize)]
pub struct SignUpBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpMetadata<'a>,
}

/// Profile fields stored with the auth account
#[derive(Debug, Serialize)]
pub struct SignUpMetadata<'a> {
    pub nome: Option<&'a str>,
    pub cognome: Option<&'a str>,
    pub unita_id: Option<i64>,
}

impl<'a> SignUpBody<'a> {
    pub fn new(email: &'a str, password: &'a str, profile: &'a ProfileMetadata) -> Self {
        Self {
            email,
            password,
            data: SignUpMetadata {
                nome: profile.first_name.as_deref(),
                cognome: profile.last_name.as_deref(),
                unita_id: profile.unit_id.map(|id| id.into_inner()),
            },
        }
    }
}

//! Session token inspection
//!
//! Access tokens are issued and verified by the auth service. The console
//! only reads their claims (subject, email, expiry, profile metadata) to
//! restore a session without another round trip. Signatures are not
//! checked here.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use scout_core::{AuthUser, ProfileMetadata, UnitId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// Claims carried by an auth service access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (auth user UUID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Metadata supplied at sign-up (`nome`, `cognome`, `unita_id`)
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub user_metadata: Value,
}

impl SessionClaims {
    /// Subject parsed as the auth user id
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Profile metadata; blank strings and malformed unit ids read as absent
    #[must_use]
    pub fn profile_metadata(&self) -> ProfileMetadata {
        profile_metadata_from(&self.user_metadata)
    }

    /// Identity described by these claims
    pub fn auth_user(&self) -> Result<AuthUser, AppError> {
        Ok(AuthUser {
            id: self.user_id()?,
            email: self.email.clone().unwrap_or_default(),
            metadata: self.profile_metadata(),
        })
    }
}

/// Read profile metadata from an auth `user_metadata` object
#[must_use]
pub fn profile_metadata_from(raw: &Value) -> ProfileMetadata {
    let text = |key: &str| {
        raw.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    ProfileMetadata {
        first_name: text("nome"),
        last_name: text("cognome"),
        unit_id: raw.get("unita_id").and_then(UnitId::from_json),
    }
}

/// Reads claims out of access tokens without verifying them
#[derive(Clone)]
pub struct SessionTokenInspector {
    key: DecodingKey,
    validation: Validation,
}

impl Default for SessionTokenInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTokenInspector {
    #[must_use]
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::from(["sub".to_string()]);

        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    /// Decode the claims of an access token
    ///
    /// # Errors
    /// Returns `InvalidToken` for anything that is not a well-formed JWT with
    /// the expected claims.
    pub fn inspect(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }

    /// Decode and reject tokens already expired at `now`
    pub fn inspect_live(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, AppError> {
        let claims = self.inspect(token)?;
        if claims.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }
        Ok(claims)
    }
}

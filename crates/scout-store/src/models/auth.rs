//! Auth endpoint payloads

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// User object returned by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserRow {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

/// Successful password or refresh-token grant
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry (Unix seconds), newer servers only
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUserRow,
}

/// Sign-up answers with a session when email confirmation is off, with the
/// bare user otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(TokenResponse),
    PendingConfirmation(AuthUserRow),
}

/// Error body of the auth endpoints; field names vary across versions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorBody {
    /// First human-readable message present
    pub fn text(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
    }

    /// Machine-readable code, if any
    pub fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }
}

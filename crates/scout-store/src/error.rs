//! Error handling for backend calls

use scout_core::error::DomainError;
use serde::Deserialize;

/// PostgREST code for "no (or more than one) row" on a single-object request
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Postgres code raised when row-level policies recurse into themselves
pub const POLICY_RECURSION_CODE: &str = "42P17";

/// Postgres code for insufficient privilege
pub const INSUFFICIENT_PRIVILEGE_CODE: &str = "42501";

/// Error body returned by the REST interface
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Parse an error body, falling back to the raw text as the message
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: (!body.trim().is_empty()).then(|| body.trim().to_string()),
            ..Self::default()
        })
    }

    fn code_is(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Errors raised while talking to the backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {}", .error.message.as_deref().unwrap_or("no message"))]
    Status { status: u16, error: PostgrestError },

    #[error("Could not decode backend response: {0}")]
    Decode(String),

    #[error("Refusing to {0} without a row filter")]
    Unfiltered(&'static str),
}

impl StoreError {
    /// Single-object request matched no row
    pub fn is_no_rows(&self) -> bool {
        match self {
            Self::Status { status, error } => error.code_is(NO_ROWS_CODE) || *status == 406,
            _ => false,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Status { status: 401, .. } => DomainError::Unauthenticated,
            StoreError::Status { ref error, .. } if error.code_is(POLICY_RECURSION_CODE) => {
                DomainError::BackendError(
                    "row-level access policy recursion on the backend".to_string(),
                )
            }
            StoreError::Status { ref error, .. } if error.code_is(INSUFFICIENT_PRIVILEGE_CODE) => {
                DomainError::BackendError(format!(
                    "permission denied: {}",
                    error.message.as_deref().unwrap_or_default()
                ))
            }
            StoreError::Decode(msg) => DomainError::MalformedRecord(msg),
            StoreError::Unfiltered(op) => {
                DomainError::InternalError(format!("refusing to {op} without a row filter"))
            }
            other => DomainError::BackendError(other.to_string()),
        }
    }
}

/// Convert a store error into a domain error
pub fn map_store_error(e: StoreError) -> DomainError {
    DomainError::from(e)
}

//! Auth failure classification

use scout_core::error::AuthError;

use crate::models::AuthErrorBody;

const EMAIL_NOT_CONFIRMED: &[&str] = &["email_not_confirmed"];
const INVALID_CREDENTIALS: &[&str] = &["invalid_credentials", "invalid_grant"];
const ALREADY_REGISTERED: &[&str] = &["user_already_exists", "email_exists"];

/// Map an auth endpoint error response onto an [`AuthError`]
///
/// Codes win over message text; older servers only send the message.
pub fn classify_auth_failure(status: u16, body: &AuthErrorBody) -> AuthError {
    if status >= 500 {
        return AuthError::Unavailable(body.text().to_string());
    }

    let code = body.code().unwrap_or_default();
    let text = body.text().to_ascii_lowercase();

    if EMAIL_NOT_CONFIRMED.contains(&code) || text.contains("email not confirmed") {
        return AuthError::EmailNotConfirmed;
    }
    if ALREADY_REGISTERED.contains(&code) || text.contains("already registered") {
        return AuthError::AlreadyRegistered;
    }
    if INVALID_CREDENTIALS.contains(&code) || text.contains("invalid login credentials") {
        return AuthError::InvalidCredentials;
    }

    AuthError::Rejected(body.text().to_string())
}

/// Map a transport failure
pub(crate) fn transport_failure(e: &reqwest::Error) -> AuthError {
    AuthError::Unavailable(e.to_string())
}

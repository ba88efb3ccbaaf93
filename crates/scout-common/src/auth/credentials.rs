//! Sign-up credential checks

use crate::error::AppError;

/// Minimum password length accepted by the auth service
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate password strength
///
/// The auth service enforces its own policy; this mirrors its length floor
/// so the user gets the message before a round trip.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    if password.trim().is_empty() {
        return Err(AppError::Validation(
            "Password must not be blank".to_string(),
        ));
    }

    Ok(())
}

/// Check that the two password fields match
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), AppError> {
    if password != confirmation {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

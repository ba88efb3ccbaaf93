//! Authentication utilities
//!
//! The console never issues or verifies tokens itself; these helpers only
//! read what the auth service hands out and check sign-up input before it
//! is sent.

mod credentials;
mod registration;
mod session_token;

pub use credentials::{
    validate_password_confirmation, validate_password_strength, MIN_PASSWORD_LENGTH,
};
pub use registration::{RegistrationToken, REGISTRATION_PAGE, REGISTRATION_PARAM};
pub use session_token::{profile_metadata_from, SessionClaims, SessionTokenInspector};

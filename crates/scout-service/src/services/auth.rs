//! Authentication service
//!
//! Handles sign-in, sign-up, sign-out and the notices shown on the login
//! form. Credentials are checked by the external auth service; only form
//! input is validated here.

use scout_common::auth::{validate_password_confirmation, validate_password_strength};
use scout_core::{AuthSession, ProfileMetadata, SignUpOutcome};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{LoginNotice, LoginRequest, NoticeKind, SignUpRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_in(&self, request: LoginRequest) -> ServiceResult<AuthSession> {
        request.validate()?;
        let session = self
            .ctx
            .auth()
            .sign_in(request.email.trim(), &request.password)
            .await?;
        info!(auth_id = %session.user.id, "User signed in");
        Ok(session)
    }

    /// Register a new account
    ///
    /// The unit and the name parts travel as account metadata; the profile
    /// row itself is created on the backend side.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(&self, request: SignUpRequest) -> ServiceResult<SignUpOutcome> {
        request.validate()?;
        validate_password_confirmation(&request.password, &request.password_confirmation)?;
        validate_password_strength(&request.password)?;
        let unit_id = request
            .unit_id
            .ok_or_else(|| ServiceError::validation("Select a unit"))?;

        let profile = ProfileMetadata {
            first_name: Some(request.first_name.trim().to_string()),
            last_name: Some(request.last_name.trim().to_string()),
            unit_id: Some(unit_id),
        };

        let outcome = self
            .ctx
            .auth()
            .sign_up(request.email.trim(), &request.password, &profile)
            .await?;
        info!(
            unit_id = %unit_id,
            confirmation_required = matches!(outcome, SignUpOutcome::ConfirmationRequired),
            "User signed up"
        );
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> ServiceResult<()> {
        self.ctx.auth().sign_out().await?;
        Ok(())
    }

    pub async fn current_session(&self) -> ServiceResult<Option<AuthSession>> {
        Ok(self.ctx.auth().current_session().await?)
    }
}

/// Notice for the login form from its `message`, `error` and `event`
/// parameters
///
/// A known `message` wins over `error`; the event name is appended to error
/// notices.
pub fn login_notice(
    message: Option<&str>,
    error: Option<&str>,
    event: Option<&str>,
) -> Option<LoginNotice> {
    match message {
        Some("confirm-email") => {
            return Some(LoginNotice {
                kind: NoticeKind::Info,
                text: "Registration complete! Check your email to confirm the account, then sign in."
                    .to_string(),
            })
        }
        Some("registration-success") => {
            return Some(LoginNotice {
                kind: NoticeKind::Success,
                text: "Registration completed successfully! Check your email to verify the account, then sign in."
                    .to_string(),
            })
        }
        _ => {}
    }

    let code = error?;
    let detail = match code {
        "session_error" => "Problem with the authentication session.".to_string(),
        "no_session" => "Session not found, please sign in.".to_string(),
        "no_user" => "Invalid user data.".to_string(),
        "init_error" => "Error while initializing the console.".to_string(),
        "signed_out" => "You have been signed out.".to_string(),
        other => format!("Error code: {other}"),
    };

    let mut text = format!("An error occurred. {detail}");
    if let Some(event) = event {
        text.push_str(&format!(" (Event: {event})"));
    }

    Some(LoginNotice {
        kind: NoticeKind::Error,
        text,
    })
}

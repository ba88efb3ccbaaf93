//! Auth collaborator trait

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::entities::{AuthEvent, AuthSession, ProfileMetadata};
use crate::error::AuthError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// What the auth service did with a sign-up request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created and signed in immediately
    SignedIn(Box<AuthSession>),
    /// Account created; the user must confirm the email first
    ConfirmationRequired,
}

/// External authentication service
///
/// Token issuance, verification and password storage all live behind this
/// trait.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileMetadata,
    ) -> AuthResult<SignUpOutcome>;

    /// Current session, `None` when signed out
    async fn current_session(&self) -> AuthResult<Option<AuthSession>>;

    async fn sign_out(&self) -> AuthResult<()>;

    /// Subscribe to session changes
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

//! Auth provider backed by the hosted auth endpoint

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use scout_common::SessionTokenInspector;
use scout_core::entities::{AuthEvent, AuthSession, ProfileMetadata};
use scout_core::error::AuthError;
use scout_core::traits::{AuthProvider, AuthResult, SignUpOutcome};

use super::errors::{classify_auth_failure, transport_failure};
use crate::client::{RestClient, StoreConfig, TokenSlot};
use crate::mappers::{session_from_token_response, SignUpBody};
use crate::models::{AuthErrorBody, SignUpResponse, TokenResponse};

/// Buffered auth events per subscriber
const EVENT_CAPACITY: usize = 16;

/// Sessions this close to expiry are refreshed before being handed out
const REFRESH_MARGIN_SECS: i64 = 30;

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Auth provider holding the current session in memory
///
/// Every session change is written through to the REST client's token slot
/// and announced on the event channel.
pub struct RestAuthProvider {
    http: reqwest::Client,
    config: StoreConfig,
    token_slot: TokenSlot,
    session: RwLock<Option<AuthSession>>,
    events: broadcast::Sender<AuthEvent>,
    inspector: SessionTokenInspector,
}

impl RestAuthProvider {
    /// Create a provider sharing the client's connection pool and token slot
    pub fn new(client: &RestClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            http: client.http().clone(),
            config: client.config().clone(),
            token_slot: client.token_slot(),
            session: RwLock::new(None),
            events,
            inspector: SessionTokenInspector::new(),
        }
    }

    /// Current session without refreshing it
    pub fn session_snapshot(&self) -> Option<AuthSession> {
        self.session.read().clone()
    }

    /// Exchange the refresh token for a new session
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> AuthResult<AuthSession> {
        let refresh_token = self
            .session
            .read()
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
            .ok_or(AuthError::SessionMissing)?;

        let session = self.refresh_with(&refresh_token).await?;
        self.install(session.clone(), AuthEvent::TokenRefreshed);
        info!(user_id = %session.user.id, "Session refreshed");
        Ok(session)
    }

    /// Resume a session from tokens saved by an earlier run
    ///
    /// A live access token is trusted as is. An expired or unreadable one
    /// falls back to the refresh token when there is one.
    #[instrument(skip_all)]
    pub async fn restore_session(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> AuthResult<AuthSession> {
        let now = Utc::now();
        let restored = self
            .inspector
            .inspect_live(access_token, now)
            .and_then(|claims| {
                Ok(AuthSession {
                    access_token: access_token.to_string(),
                    refresh_token: refresh_token.map(String::from),
                    expires_at: claims.expires_at().unwrap_or(now),
                    user: claims.auth_user()?,
                })
            });

        let session = match (restored, refresh_token) {
            (Ok(session), _) => session,
            (Err(e), Some(refresh_token)) => {
                debug!(error = %e, "Access token unusable, trying refresh token");
                self.refresh_with(refresh_token).await?
            }
            (Err(e), None) => {
                debug!(error = %e, "Access token unusable and no refresh token");
                return Err(AuthError::SessionMissing);
            }
        };

        self.install(session.clone(), AuthEvent::SignedIn);
        info!(user_id = %session.user.id, "Session restored");
        Ok(session)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.auth_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    async fn send(&self, builder: RequestBuilder) -> AuthResult<Response> {
        let response = builder.send().await.map_err(|e| transport_failure(&e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<AuthErrorBody>().await.unwrap_or_default();
        Err(classify_auth_failure(status.as_u16(), &body))
    }

    async fn token_grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> AuthResult<AuthSession> {
        let builder = self
            .post("token")
            .query(&[("grant_type", grant_type)])
            .json(body);
        let response: TokenResponse = self
            .send(builder)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Rejected(e.to_string()))?;
        Ok(session_from_token_response(response, Utc::now()))
    }

    async fn refresh_with(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        self.token_grant("refresh_token", &RefreshGrant { refresh_token })
            .await
    }

    fn install(&self, session: AuthSession, event: fn(Box<AuthSession>) -> AuthEvent) {
        *self.token_slot.write() = Some(session.access_token.clone());
        *self.session.write() = Some(session.clone());
        self.emit(event(Box::new(session)));
    }

    /// Forget the local session; returns whether there was one
    fn clear(&self) -> bool {
        *self.token_slot.write() = None;
        self.session.write().take().is_some()
    }

    fn emit(&self, event: AuthEvent) {
        let name = event.name();
        if self.events.send(event).is_err() {
            debug!(event = name, "No auth event subscribers");
        }
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let session = self
            .token_grant("password", &PasswordGrant { email, password })
            .await?;
        self.install(session.clone(), AuthEvent::SignedIn);
        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    #[instrument(skip(self, password, profile))]
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &ProfileMetadata,
    ) -> AuthResult<SignUpOutcome> {
        let builder = self
            .post("signup")
            .json(&SignUpBody::new(email, password, profile));
        let response: SignUpResponse = self
            .send(builder)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Rejected(e.to_string()))?;

        match response {
            SignUpResponse::Session(tokens) => {
                let session = session_from_token_response(tokens, Utc::now());
                self.install(session.clone(), AuthEvent::SignedIn);
                info!(user_id = %session.user.id, "Signed up and signed in");
                Ok(SignUpOutcome::SignedIn(Box::new(session)))
            }
            SignUpResponse::PendingConfirmation(user) => {
                info!(user_id = %user.id, "Signed up, awaiting email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    async fn current_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(session) = self.session_snapshot() else {
            return Ok(None);
        };

        if !session.is_expired_at(Utc::now() + Duration::seconds(REFRESH_MARGIN_SECS)) {
            return Ok(Some(session));
        }

        if session.refresh_token.is_none() {
            debug!("Session expired without refresh token");
            if self.clear() {
                self.emit(AuthEvent::SignedOut);
            }
            return Ok(None);
        }

        match self.refresh().await {
            Ok(session) => Ok(Some(session)),
            Err(AuthError::Unavailable(msg)) => Err(AuthError::Unavailable(msg)),
            Err(e) => {
                warn!(error = %e, "Session refresh rejected, signing out");
                if self.clear() {
                    self.emit(AuthEvent::SignedOut);
                }
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> AuthResult<()> {
        let access_token = self
            .session
            .read()
            .as_ref()
            .map(|s| s.access_token.clone());

        if let Some(token) = access_token {
            let builder = self.post("logout").bearer_auth(token);
            if let Err(e) = self.send(builder).await {
                warn!(error = %e, "Remote sign-out failed, dropping local session anyway");
            }
        }

        self.clear();
        self.emit(AuthEvent::SignedOut);
        info!("Signed out");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

//! Service context - dependency container for services
//!
//! Holds the repositories, the auth provider and the few settings services
//! need at runtime.

use std::sync::Arc;

use scout_core::traits::{
    ActivityRepository, AuthProvider, MemberRepository, SettingRepository, UnitRepository,
    UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone: every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    unit_repo: Arc<dyn UnitRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    member_repo: Arc<dyn MemberRepository>,
    setting_repo: Arc<dyn SettingRepository>,

    // Auth
    auth: Arc<dyn AuthProvider>,

    // Settings
    registration_base_url: String,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn unit_repo(&self) -> &dyn UnitRepository {
        self.unit_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    pub fn setting_repo(&self) -> &dyn SettingRepository {
        self.setting_repo.as_ref()
    }

    // === Auth ===

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    // === Settings ===

    /// Base URL registration links are built on
    pub fn registration_base_url(&self) -> &str {
        &self.registration_base_url
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("auth", &"dyn AuthProvider")
            .field("registration_base_url", &self.registration_base_url)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    unit_repo: Option<Arc<dyn UnitRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    setting_repo: Option<Arc<dyn SettingRepository>>,
    auth: Option<Arc<dyn AuthProvider>>,
    registration_base_url: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn unit_repo(mut self, repo: Arc<dyn UnitRepository>) -> Self {
        self.unit_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn setting_repo(mut self, repo: Arc<dyn SettingRepository>) -> Self {
        self.setting_repo = Some(repo);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn registration_base_url(mut self, url: impl Into<String>) -> Self {
        self.registration_base_url = Some(url.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::validation(format!("{name} is required"));

        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| missing("user_repo"))?,
            unit_repo: self.unit_repo.ok_or_else(|| missing("unit_repo"))?,
            activity_repo: self.activity_repo.ok_or_else(|| missing("activity_repo"))?,
            member_repo: self.member_repo.ok_or_else(|| missing("member_repo"))?,
            setting_repo: self.setting_repo.ok_or_else(|| missing("setting_repo"))?,
            auth: self.auth.ok_or_else(|| missing("auth"))?,
            registration_base_url: self
                .registration_base_url
                .ok_or_else(|| missing("registration_base_url"))?,
        })
    }
}

//! Backend connection settings

use std::time::Duration;

use scout_common::BackendConfig;

/// Connection settings for the REST and auth endpoints
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base of the REST interface, e.g. `https://xyz.supabase.co/rest/v1`
    pub rest_url: String,
    /// Base of the auth interface, e.g. `https://xyz.supabase.co/auth/v1`
    pub auth_url: String,
    /// Public API key, sent as `apikey` and as the bearer when signed out
    pub anon_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321", "")
    }
}

impl StoreConfig {
    /// Settings for a project URL and API key, with a 15 second timeout
    pub fn new(project_url: &str, anon_key: &str) -> Self {
        let base = project_url.trim_end_matches('/');
        Self {
            rest_url: format!("{base}/rest/v1"),
            auth_url: format!("{base}/auth/v1"),
            anon_key: anon_key.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl From<&BackendConfig> for StoreConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            rest_url: config.rest_url(),
            auth_url: config.auth_url(),
            anon_key: config.anon_key.clone(),
            timeout: config.timeout(),
        }
    }
}

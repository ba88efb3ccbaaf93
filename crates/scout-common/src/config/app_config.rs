//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendConfig,
    pub registration: RegistrationConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Hosted backend (auth + REST) connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Project URL without trailing slash, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public (anon) API key sent with every request
    pub anon_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base of the REST interface
    #[must_use]
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Base of the auth interface
    #[must_use]
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }
}

/// Registration link settings
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Site root the registration page lives under, always ending in `/`
    #[serde(default = "default_registration_base_url")]
    pub base_url: String,
}

// Default value functions
fn default_app_name() -> String {
    "scout-console".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_registration_base_url() -> String {
    "http://localhost:8080/".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("SCOUT_BACKEND_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingVar("SCOUT_BACKEND_URL"))?;
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue("SCOUT_BACKEND_URL", url));
        }

        let anon_key = lookup("SCOUT_ANON_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingVar("SCOUT_ANON_KEY"))?;

        let timeout_secs = match lookup("SCOUT_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidValue("SCOUT_HTTP_TIMEOUT_SECS", raw)),
            },
            None => default_timeout_secs(),
        };

        let env = match lookup("APP_ENV") {
            Some(raw) => {
                Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?
            }
            None => Environment::default(),
        };

        let mut base_url = lookup("SCOUT_REGISTRATION_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_registration_base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            backend: BackendConfig {
                url,
                anon_key: anon_key.trim().to_string(),
                timeout_secs,
            },
            registration: RegistrationConfig { base_url },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

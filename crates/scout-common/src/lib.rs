//! # scout-common
//!
//! Shared utilities including configuration, error handling, telemetry,
//! session token inspection and registration links.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    profile_metadata_from, validate_password_confirmation, validate_password_strength,
    RegistrationToken, SessionClaims, SessionTokenInspector, MIN_PASSWORD_LENGTH,
};
pub use config::{AppConfig, AppSettings, BackendConfig, ConfigError, Environment, RegistrationConfig};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};

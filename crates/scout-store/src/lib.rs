//! # scout-store
//!
//! Data access layer implementing the `scout-core` traits against a hosted
//! backend: a PostgREST-style REST interface for the tables and a
//! GoTrue-style auth endpoint.
//!
//! ## Overview
//!
//! - `client`: shared HTTP client carrying the API key and the session token
//! - `query`: table query builder (filters, ordering, limits)
//! - `models`: serde row types with the backend's column names
//! - `mappers`: the only place raw rows are coerced into entities
//! - `repositories`: repository trait implementations
//! - `auth`: auth provider with an in-memory session and change events
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scout_common::AppConfig;
//! use scout_store::{RestClient, RestUnitRepository, StoreConfig};
//! use scout_core::{QueryFilter, UnitRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let client = RestClient::new(StoreConfig::from(&config.backend))?;
//!     let units = RestUnitRepository::new(client).list(&QueryFilter::NoFilter).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod mappers;
pub mod models;
pub mod query;
pub mod repositories;

// Re-export commonly used types
pub use auth::RestAuthProvider;
pub use client::{RestClient, StoreConfig};
pub use error::StoreError;
pub use query::TableQuery;
pub use repositories::{
    RestActivityRepository, RestMemberRepository, RestSettingRepository, RestUnitRepository,
    RestUserRepository,
};

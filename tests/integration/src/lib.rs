//! Integration test utilities for the scout console
//!
//! In-memory stand-ins for every repository and the auth provider, a seeded
//! test world, and helpers for the optional live backend tests.

pub mod fakes;

pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;

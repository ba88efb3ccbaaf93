//! Auth adapter
//!
//! Talks to the hosted auth endpoint, keeps the current session in memory
//! and hands its access token to the shared [`RestClient`](crate::RestClient)
//! so table requests run as the signed-in user.

mod errors;
mod provider;

pub use errors::classify_auth_failure;
pub use provider::RestAuthProvider;

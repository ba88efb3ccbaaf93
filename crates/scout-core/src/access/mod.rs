//! Access control - scope resolution and scoped query filters
//!
//! Everything here is pure: no I/O and no error cases.

mod filter;
mod scope;

pub use filter::{QueryFilter, ScopedQueryBuilder, ScopedResource};
pub use scope::{AccessScope, AccessScopeResolver};

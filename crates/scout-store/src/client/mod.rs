//! Shared REST client

mod config;
mod rest;

pub use config::StoreConfig;
pub use rest::{RestClient, TokenSlot};

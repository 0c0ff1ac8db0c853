//! Orchard API Library
//!
//! This crate contains the HTTP surface for the Orchard storefront:
//! bearer-token resolution, the deluxe-membership endpoints, and the
//! card listing the upgrade flow reads from.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

//! Orchard Shared Types and Utilities
//!
//! This crate contains types and database plumbing shared across the Orchard platform.

pub mod db;
pub mod types;

pub use db::*;
pub use types::*;

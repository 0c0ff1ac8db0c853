//! Authentication module for Orchard
//!
//! Credential login and token issuance live with the external auth
//! gateway; this module only validates incoming bearer tokens and
//! resolves them to user records.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtError, JwtManager};
pub use middleware::{require_auth, AuthState, AuthUser};

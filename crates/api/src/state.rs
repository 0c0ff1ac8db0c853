//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use orchard_membership::{EligibilityPolicy, MembershipLedger};

use crate::auth::{AuthState, JwtManager};
use crate::config::Config;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtManager,
    pub ledger: Arc<MembershipLedger>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_expiry_hours);
        let policy = EligibilityPolicy::new(config.membership_ineligible_roles.clone());
        let ledger = Arc::new(MembershipLedger::new(pool.clone(), policy));

        Self {
            pool,
            config: Arc::new(config),
            jwt,
            ledger,
        }
    }

    /// State slice consumed by the auth middleware
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt: self.jwt.clone(),
            pool: self.pool.clone(),
        }
    }
}

//! Application configuration

use std::env;

use orchard_shared::UserRole;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Authentication
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    // Storefront
    /// Email domain of the deployment, e.g. "orchard.test". Injected
    /// configuration, never resolved from ambient global state.
    pub application_domain: String,
    /// Roles barred from deluxe enrollment
    pub membership_ineligible_roles: Vec<UserRole>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // Authentication
            jwt_secret: {
                let secret =
                    env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
                if secret.len() < 32 {
                    return Err(ConfigError::WeakSecret(
                        "JWT_SECRET must be at least 32 characters",
                    ));
                }
                secret
            },
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .unwrap_or(24),

            // Storefront
            application_domain: env::var("APPLICATION_DOMAIN")
                .unwrap_or_else(|_| "localhost".to_string()),
            membership_ineligible_roles: {
                let raw = env::var("MEMBERSHIP_INELIGIBLE_ROLES")
                    .unwrap_or_else(|_| "admin,accountant".to_string());
                parse_role_list(&raw)?
            },
        })
    }
}

fn parse_role_list(raw: &str) -> Result<Vec<UserRole>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<UserRole>()
                .map_err(|_| ConfigError::InvalidRole(s.to_string()))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
    #[error("Unknown role in MEMBERSHIP_INELIGIBLE_ROLES: {0}")]
    InvalidRole(String),
}

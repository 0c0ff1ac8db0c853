//! Common types used across Orchard

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// ID Wrappers
// =============================================================================

/// User ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Saved card ID wrapper (sequential, exposed to clients as `paymentId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CardId(pub i64);

impl From<i64> for CardId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Account role. Stored as text; the set may grow, so `FromStr`
/// rejects unknown names and callers pick their own fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Accountant,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "accountant" => Ok(Self::Accountant),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Accountant => write!(f, "accountant"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Error for role strings outside the known set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Membership dimension of an account. Created once by a successful
/// upgrade; there is no downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    None,
    Deluxe,
}

impl Default for MembershipStatus {
    fn default() -> Self {
        Self::None
    }
}

impl MembershipStatus {
    pub fn is_deluxe(&self) -> bool {
        matches!(self, Self::Deluxe)
    }
}

impl FromStr for MembershipStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "deluxe" => Ok(Self::Deluxe),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error for membership status strings outside the known set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown membership status: {0}")]
pub struct UnknownStatus(pub String);

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Deluxe => write!(f, "deluxe"),
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// User account row. Owned by the account subsystem; the membership
/// engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub membership_status: MembershipStatus,
}

/// Saved payment card. The membership engine only queries ownership.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: CardId,
    pub user_id: UserId,
    pub card_num: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
}

/// Committed membership. At most one row per user, enforced by the
/// schema; never mutated or deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MembershipRecord {
    pub user_id: UserId,
    pub cost: i64,
    pub activated_at: OffsetDateTime,
}

// =============================================================================
// Upstream contracts
// =============================================================================

/// Outcome of the external login collaborator. The second-factor
/// challenge is a tagged variant, not an error, so callers branch
/// without control-flow-via-error. This service only ever consumes the
/// bearer token that results from a fully resolved login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    Token {
        token: String,
    },
    TotpTokenRequired {
        #[serde(rename = "tmpToken")]
        tmp_token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Customer, UserRole::Accountant, UserRole::Admin] {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("moderator".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_membership_status() {
        assert!(MembershipStatus::Deluxe.is_deluxe());
        assert!(!MembershipStatus::None.is_deluxe());
        assert_eq!(MembershipStatus::default(), MembershipStatus::None);
        assert_eq!(
            "deluxe".parse::<MembershipStatus>().unwrap(),
            MembershipStatus::Deluxe
        );
        assert!("gold".parse::<MembershipStatus>().is_err());
    }

    #[test]
    fn test_login_outcome_tagging() {
        let token: LoginOutcome = serde_json::from_str(
            r#"{"status":"token","token":"abc"}"#,
        )
        .unwrap();
        assert!(matches!(token, LoginOutcome::Token { .. }));

        let totp: LoginOutcome = serde_json::from_str(
            r#"{"status":"totp_token_required","tmpToken":"xyz"}"#,
        )
        .unwrap();
        assert!(matches!(totp, LoginOutcome::TotpTokenRequired { .. }));
    }
}

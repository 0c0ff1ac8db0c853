//! Membership error taxonomy
//!
//! The display strings of the client-facing variants are a stable wire
//! contract, not incidental text. Callers serialize them verbatim into
//! the `error` field of a 400 response.

use thiserror::Error;

/// Membership-specific errors
#[derive(Debug, Error)]
pub enum MembershipError {
    /// A membership record already exists for this user
    #[error("You are already a deluxe member!")]
    AlreadyMember,

    /// The user's role is barred from enrollment
    #[error("You are not eligible for deluxe membership!")]
    IneligibleRole,

    /// The referenced card does not exist or belongs to another user
    #[error("Invalid Card")]
    InvalidCard,

    /// Wallet or any other unsupported payment mode. The message is
    /// intentionally generic and does not reveal whether the mode is
    /// unimplemented or rejected.
    #[error("Something went wrong. Please try again!")]
    UnsupportedMode,

    /// Unexpected store failure, rendered with the same generic
    /// message as the unsupported-mode case so storage details never
    /// reach a client
    #[error("Something went wrong. Please try again!")]
    Store(#[source] sqlx::Error),
}

impl From<sqlx::Error> for MembershipError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique violation on memberships.user_id:
            // a concurrent upgrade won the race
            if db_err.code().as_deref() == Some("23505") {
                return MembershipError::AlreadyMember;
            }
        }
        tracing::error!("membership store error: {:?}", err);
        MembershipError::Store(err)
    }
}

/// Result type alias for membership operations
pub type MembershipResult<T> = Result<T, MembershipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_literals() {
        assert_eq!(
            MembershipError::AlreadyMember.to_string(),
            "You are already a deluxe member!"
        );
        assert_eq!(
            MembershipError::IneligibleRole.to_string(),
            "You are not eligible for deluxe membership!"
        );
        assert_eq!(MembershipError::InvalidCard.to_string(), "Invalid Card");
        assert_eq!(
            MembershipError::UnsupportedMode.to_string(),
            "Something went wrong. Please try again!"
        );
    }

    #[test]
    fn test_store_failure_stays_generic() {
        let err = MembershipError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "Something went wrong. Please try again!");
    }
}

//! Membership ledger
//!
//! The transactional side of the decision engine. `upgrade` holds a
//! row lock on the user across the eligibility re-check, the card
//! lookup, and the commit, so two racing upgrades for one user cannot
//! both pass the gates. The `memberships.user_id` primary key is the
//! backstop: a unique violation surfaces as `AlreadyMember`.

use sqlx::PgPool;

use orchard_shared::{MembershipRecord, MembershipStatus, UserId, UserRole};

use crate::eligibility::EligibilityPolicy;
use crate::error::{MembershipError, MembershipResult};
use crate::payment::{self, PaymentReference};

/// Fixed price of a deluxe upgrade, in whole currency units. Never
/// user- or payment-mode-dependent.
pub const MEMBERSHIP_COST: i64 = 49;

/// Membership ledger service
pub struct MembershipLedger {
    pool: PgPool,
    policy: EligibilityPolicy,
}

impl MembershipLedger {
    pub fn new(pool: PgPool, policy: EligibilityPolicy) -> Self {
        Self { pool, policy }
    }

    /// Cost preview behind the read-only status query. Runs the
    /// eligibility gate against the caller-resolved state; no writes.
    pub fn preview_cost(
        &self,
        role: UserRole,
        status: MembershipStatus,
    ) -> MembershipResult<i64> {
        self.policy.check(role, status)?;
        Ok(MEMBERSHIP_COST)
    }

    /// Commit an upgrade. Gate order:
    ///
    /// 1. payment-mode classification (pure; wallet and unknown modes
    ///    are rejected for every caller, members and admins included),
    /// 2. eligibility against a freshly locked user row,
    /// 3. card ownership,
    /// 4. atomic insert of the membership record plus status flip.
    pub async fn upgrade(
        &self,
        user_id: UserId,
        reference: &PaymentReference,
    ) -> MembershipResult<MembershipRecord> {
        let card_id = payment::classify(reference)?;

        let mut tx = self.pool.begin().await?;

        // Fresh, locked read: concurrent upgrades for the same user
        // serialize on this row. Cross-user upgrades never contend.
        let gate: Option<(String, String)> = sqlx::query_as(
            "SELECT role, membership_status FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (role, status) = gate.ok_or(MembershipError::Store(sqlx::Error::RowNotFound))?;
        // Unknown role strings are treated as plain customers; the
        // policy rejects by name over a closed set
        let role: UserRole = role.parse().unwrap_or_default();
        let status: MembershipStatus = status.parse().unwrap_or_default();
        self.policy.check(role, status)?;

        payment::verify_card_ownership(&mut *tx, user_id, card_id).await?;

        let record: MembershipRecord = sqlx::query_as(
            "INSERT INTO memberships (user_id, cost) VALUES ($1, $2) \
             RETURNING user_id, cost, activated_at",
        )
        .bind(user_id)
        .bind(MEMBERSHIP_COST)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET membership_status = 'deluxe' WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            card_id = %card_id,
            cost = MEMBERSHIP_COST,
            "deluxe membership activated"
        );

        Ok(record)
    }

    /// Read the committed record for a user, if any
    pub async fn membership(&self, user_id: UserId) -> MembershipResult<Option<MembershipRecord>> {
        let record = sqlx::query_as(
            "SELECT user_id, cost, activated_at FROM memberships WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }
}

//! Deluxe membership endpoints
//!
//! The decision engine sits behind these two handlers; they only
//! translate between the wire and `MembershipLedger` outcomes. Both
//! response bodies and the 400 error literals are a fixed contract.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use orchard_membership::PaymentReference;

use crate::auth::AuthUser;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

/// Body of a successful status query
#[derive(Debug, Serialize)]
pub struct MembershipStatusResponse {
    pub data: MembershipCost,
}

#[derive(Debug, Serialize)]
pub struct MembershipCost {
    #[serde(rename = "membershipCost")]
    pub membership_cost: i64,
}

/// Body of a successful upgrade
#[derive(Debug, Serialize)]
pub struct UpgradeResponse {
    pub status: &'static str,
}

/// GET /rest/deluxe-membership
///
/// Cost preview for an eligible caller; the eligibility rejections
/// come back as 400 with their wire literals.
pub async fn membership_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<MembershipStatusResponse>> {
    let cost = state
        .ledger
        .preview_cost(auth_user.role, auth_user.membership_status)?;

    Ok(Json(MembershipStatusResponse {
        data: MembershipCost {
            membership_cost: cost,
        },
    }))
}

/// POST /rest/deluxe-membership
///
/// Commits the upgrade; at most one membership record ever exists per
/// user, no matter how many requests race.
pub async fn upgrade_membership(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(reference): ApiJson<PaymentReference>,
) -> ApiResult<Json<UpgradeResponse>> {
    tracing::debug!(
        user_id = %auth_user.id,
        payment_mode = %reference.payment_mode,
        "deluxe upgrade requested"
    );

    state.ledger.upgrade(auth_user.id, &reference).await?;

    Ok(Json(UpgradeResponse { status: "success" }))
}

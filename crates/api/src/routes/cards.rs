//! Saved card listing
//!
//! The upgrade flow reads this to pick a `paymentId`. Card management
//! itself belongs to the wallet/checkout subsystem.

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use orchard_shared::Card;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CardListResponse {
    pub status: &'static str,
    pub data: Vec<Card>,
}

/// GET /api/Cards — list the caller's saved cards
pub async fn list_cards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Json<CardListResponse>> {
    let cards: Vec<Card> = sqlx::query_as(
        "SELECT id, user_id, card_num, expiry_month, expiry_year \
         FROM cards WHERE user_id = $1 ORDER BY id",
    )
    .bind(auth_user.id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(CardListResponse {
        status: "success",
        data: cards,
    }))
}

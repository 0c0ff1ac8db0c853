//! Payment reference validation
//!
//! Authorizes the caller-supplied payment reference only. Charge
//! settlement happens outside this service.

use serde::{Deserialize, Serialize};

use orchard_shared::{CardId, UserId};

use crate::error::{MembershipError, MembershipResult};

/// Upgrade request body as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReference {
    pub payment_mode: String,
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
}

/// `paymentId` arrives as either a JSON string or a number; both forms
/// occur in real traffic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentId {
    Number(i64),
    Text(String),
}

impl PaymentId {
    /// Card ids are numeric. A non-numeric string is a card that
    /// cannot exist, not a malformed request.
    fn as_card_id(&self) -> MembershipResult<CardId> {
        match self {
            PaymentId::Number(n) => Ok(CardId(*n)),
            PaymentId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(CardId)
                .map_err(|_| MembershipError::InvalidCard),
        }
    }
}

/// Pure classification of the payment mode, run before any state is
/// consulted. Wallet, unrecognized modes, and card mode without an id
/// all fail identically for every caller.
pub fn classify(reference: &PaymentReference) -> MembershipResult<CardId> {
    match reference.payment_mode.as_str() {
        "card" => match &reference.payment_id {
            Some(id) => id.as_card_id(),
            None => Err(MembershipError::UnsupportedMode),
        },
        _ => Err(MembershipError::UnsupportedMode),
    }
}

/// Confirm the referenced card exists and is owned by the requesting
/// user. Read-only; any lookup failure is reported as an invalid card
/// rather than a distinct infrastructure error.
pub(crate) async fn verify_card_ownership<'e, E>(
    executor: E,
    user_id: UserId,
    card_id: CardId,
) -> MembershipResult<CardId>
where
    E: sqlx::PgExecutor<'e>,
{
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM cards WHERE id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await
            .map_err(|err| {
                tracing::warn!(user_id = %user_id, card_id = %card_id, error = %err, "card lookup failed");
                MembershipError::InvalidCard
            })?;

    found.map(|(id,)| CardId(id)).ok_or(MembershipError::InvalidCard)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reference(mode: &str, id: Option<PaymentId>) -> PaymentReference {
        PaymentReference {
            payment_mode: mode.to_string(),
            payment_id: id,
        }
    }

    #[test]
    fn test_card_mode_with_numeric_id() {
        let card = classify(&reference("card", Some(PaymentId::Number(7)))).unwrap();
        assert_eq!(card, CardId(7));
    }

    #[test]
    fn test_card_mode_with_string_id() {
        // Clients stringify ids they read back from the card listing
        let card = classify(&reference("card", Some(PaymentId::Text("42".to_string())))).unwrap();
        assert_eq!(card, CardId(42));
    }

    #[test]
    fn test_card_mode_with_garbage_id_is_invalid_card() {
        let err = classify(&reference(
            "card",
            Some(PaymentId::Text("not-a-card".to_string())),
        ))
        .unwrap_err();
        assert!(matches!(err, MembershipError::InvalidCard));
    }

    #[test]
    fn test_card_mode_without_id_is_unsupported() {
        let err = classify(&reference("card", None)).unwrap_err();
        assert!(matches!(err, MembershipError::UnsupportedMode));
    }

    #[test]
    fn test_wallet_mode_is_unsupported() {
        let err = classify(&reference("wallet", Some(PaymentId::Number(1)))).unwrap_err();
        assert!(matches!(err, MembershipError::UnsupportedMode));
    }

    #[test]
    fn test_unknown_mode_is_unsupported() {
        let err = classify(&reference("iou", None)).unwrap_err();
        assert!(matches!(err, MembershipError::UnsupportedMode));
    }

    #[test]
    fn test_wire_deserialization() {
        let number: PaymentReference =
            serde_json::from_str(r#"{"paymentMode":"card","paymentId":1337}"#).unwrap();
        assert!(matches!(number.payment_id, Some(PaymentId::Number(1337))));

        let text: PaymentReference =
            serde_json::from_str(r#"{"paymentMode":"card","paymentId":"5"}"#).unwrap();
        assert!(matches!(text.payment_id, Some(PaymentId::Text(ref s)) if s == "5"));

        let wallet: PaymentReference =
            serde_json::from_str(r#"{"paymentMode":"wallet"}"#).unwrap();
        assert!(wallet.payment_id.is_none());
    }
}

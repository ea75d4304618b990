//! Transaction data models and engine request/response types.
//!
//! This module defines:
//! - `TransactionRecord`: immutable ledger entity, one row per attempt
//! - `NewTransaction`: ledger row prior to insertion
//! - `TransactionRequest` / `TransactionResponse`: the engine's external
//!   shape

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type: add funds to the card balance.
pub const TYPE_TOPUP: &str = "topup";
/// Transaction type: remove funds from the card balance.
pub const TYPE_WITHDRAW: &str = "withdraw";

/// Outcome status: balance was mutated and the mutation is recorded.
pub const STATUS_SUCCESS: &str = "success";
/// Outcome status: rejected by the gateway's card-range policy.
pub const STATUS_DECLINED: &str = "declined";
/// Outcome status: rejected by the processor; balance unchanged.
pub const STATUS_FAILED: &str = "failed";

/// An entry in the append-only audit ledger.
///
/// # Forensics
///
/// `card_number` is the plaintext number copied at attempt time — NOT
/// looked up from the cards table — so the record stays meaningful even if
/// the card row is later altered.
///
/// # Invariants
///
/// - Exactly one record exists per engine invocation, whatever the outcome
/// - A `success` record's `balance_after` equals
///   `balance_before ± amount` depending on type
/// - A non-success record is never accompanied by a balance change
/// - Records are never updated or deleted
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique id, also used as the external transaction reference
    pub id: i64,

    /// Plaintext card number as presented in the attempt
    pub card_number: String,

    /// `topup` or `withdraw`; recorded verbatim even when invalid
    pub transaction_type: String,

    /// Requested amount (positive)
    pub amount: Decimal,

    /// NULL on gateway declines; zero-filled when the card could not be
    /// resolved; otherwise the balance at the time of the attempt
    pub balance_before: Option<Decimal>,

    /// Same conventions as `balance_before`; equals it on failures
    pub balance_after: Option<Decimal>,

    /// `success`, `declined`, or `failed`
    pub status: String,

    /// Human-readable reason for non-success outcomes
    pub reason: Option<String>,

    /// Owning customer, NULL when the card was never resolved
    pub customer_id: Option<String>,

    /// Denormalized customer name, same nullability as `customer_id`
    pub customer_name: Option<String>,

    /// Set at creation by the store
    pub timestamp: DateTime<Utc>,
}

/// A ledger entry prior to insertion. The store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub card_number: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub balance_before: Option<Decimal>,
    pub balance_after: Option<Decimal>,
    pub status: String,
    pub reason: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
}

/// An inbound transaction request.
///
/// # JSON Example
///
/// ```json
/// {
///   "cardNumber": "4111111111111111",
///   "pin": "1234",
///   "amount": "100.00",
///   "type": "topup"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub card_number: String,

    pub pin: String,

    pub amount: Decimal,

    /// Kept as a free string so an unknown value reaches the processor's
    /// invalid-type path and is recorded, rather than dying in
    /// deserialization
    #[serde(rename = "type")]
    pub transaction_type: String,
}

/// The engine's response for a transaction attempt.
///
/// Declines and failures are reported here with `success: false` — they are
/// recorded outcomes, not transport errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub success: bool,

    pub message: String,

    /// Mirrors the ledger record's status for persisted outcomes
    pub status: String,

    pub amount: Decimal,

    /// New balance on success; unchanged balance on processor failures;
    /// absent on declines and non-persisted rejections
    pub balance_after: Option<Decimal>,

    pub timestamp: DateTime<Utc>,

    /// The ledger record's id, when one was written
    pub transaction_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn request_deserializes_from_api_shape() {
        let request: TransactionRequest = serde_json::from_str(
            r#"{"cardNumber":"4111111111111111","pin":"1234","amount":"100.00","type":"topup"}"#,
        )
        .unwrap();

        assert_eq!(request.card_number, "4111111111111111");
        assert_eq!(request.pin, "1234");
        assert_eq!(request.amount, Decimal::new(10000, 2));
        assert_eq!(request.transaction_type, TYPE_TOPUP);
    }

    #[test]
    fn unknown_type_still_deserializes() {
        // It must reach the processor's invalid-type path and be recorded,
        // not die in deserialization.
        let request: TransactionRequest = serde_json::from_str(
            r#"{"cardNumber":"4111111111111111","pin":"1234","amount":"10.00","type":"transfer"}"#,
        )
        .unwrap();

        assert_eq!(request.transaction_type, "transfer");
    }

    #[test]
    fn response_serializes_with_api_field_names() {
        let response = TransactionResponse {
            success: true,
            message: "Top-up successful".to_string(),
            status: STATUS_SUCCESS.to_string(),
            amount: Decimal::new(10000, 2),
            balance_after: Some(Decimal::new(160000, 2)),
            timestamp: Utc::now(),
            transaction_reference: Some("42".to_string()),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["balanceAfter"], "1600.00");
        assert_eq!(json["transactionReference"], "42");
    }
}

//! Card data models and API response types.

use rust_decimal::Decimal;
use serde::Serialize;

/// A card with its number in plaintext form.
///
/// Only `CardStore` constructs this type: the store decrypts the number on
/// read and encrypts it on write, so business logic never sees ciphertext
/// and the plaintext number is never persisted.
///
/// # Invariants
///
/// - `balance` ≥ 0 after any committed transaction (also enforced by a
///   database CHECK constraint)
/// - `card_number` is immutable after creation; only `balance` is ever
///   updated, and only by the transaction processor
#[derive(Debug, Clone)]
pub struct Card {
    /// Opaque numeric id assigned by the store on first insert
    pub id: i64,

    /// 16-digit card number (plaintext; stored encrypted)
    pub card_number: String,

    /// SHA-256 hex digest of the 4-digit PIN
    pub pin_hash: String,

    /// Current balance; non-negative decimal
    pub balance: Decimal,

    /// Disabled cards fail authentication and transaction processing
    pub active: bool,

    /// Business identifier of the owning customer (e.g. "CUST001")
    pub customer_id: String,

    /// Denormalized display name for ledger readability
    pub customer_name: String,
}

/// A card prior to insertion. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub card_number: String,
    pub pin_hash: String,
    pub balance: Decimal,
    pub active: bool,
    pub customer_id: String,
    pub customer_name: String,
}

/// Card representation returned to API clients.
///
/// The PIN digest is never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    pub id: i64,
    pub card_number: String,
    pub balance: Decimal,
    pub active: bool,
    pub customer_id: String,
    pub customer_name: String,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            card_number: card.card_number,
            balance: card.balance,
            active: card.active,
            customer_id: card.customer_id,
            customer_name: card.customer_name,
        }
    }
}

//! Persistence layer.
//!
//! Stores own all SQL and all at-rest transformations. In particular, card
//! numbers are encrypted on write and decrypted on read inside `CardStore`,
//! keeping the encryption concern out of business logic entirely.

/// Card persistence with transparent number encryption
pub mod cards;
/// Append-only transaction ledger
pub mod ledger;
/// User profile persistence
pub mod users;

pub use cards::CardStore;
pub use ledger::TransactionLedger;
pub use users::UserStore;

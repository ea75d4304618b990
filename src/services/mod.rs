//! Business logic services.
//!
//! The transaction engine is split in two stages: the `gateway` performs
//! admission control and decline bookkeeping, the `processor` performs
//! authorization and the atomic balance mutation. `accounts` handles
//! customer onboarding and card issuance.

pub mod accounts;
pub mod gateway;
pub mod processor;

pub use accounts::CustomerAccountService;
pub use gateway::TransactionGateway;
pub use processor::TransactionProcessor;

/// Last four characters of a card number for log output. Full card numbers
/// are never logged.
pub(crate) fn card_tail(card_number: &str) -> &str {
    card_number
        .get(card_number.len().saturating_sub(4)..)
        .unwrap_or(card_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_tail_takes_last_four() {
        assert_eq!(card_tail("4111111111111111"), "1111");
        assert_eq!(card_tail("4222222222222222"), "2222");
    }

    #[test]
    fn card_tail_handles_short_input() {
        assert_eq!(card_tail("42"), "42");
        assert_eq!(card_tail(""), "");
    }
}

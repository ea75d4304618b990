//! Transaction gateway — admission stage of the two-stage router.
//!
//! The gateway checks basic request validity and the card-range admission
//! policy, records declines, and hands everything else to the processor.
//! It never reads or mutates card state: its sole authority is admission
//! control and decline bookkeeping.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::AppError,
    models::transaction::{
        NewTransaction, STATUS_DECLINED, STATUS_FAILED, TransactionRequest, TransactionResponse,
    },
    services::{TransactionProcessor, card_tail},
    store::TransactionLedger,
};

/// Reason recorded when the range policy declines a card.
pub const REASON_RANGE_NOT_SUPPORTED: &str = "Card range not supported";

/// Card-range admission policy.
///
/// Only card numbers with the supported leading digit (the Visa-like `4`
/// range) are routed to the downstream processor.
pub fn admits(card_number: &str) -> bool {
    card_number.starts_with('4')
}

#[derive(Clone)]
pub struct TransactionGateway {
    processor: TransactionProcessor,
    ledger: TransactionLedger,
}

impl TransactionGateway {
    pub fn new(processor: TransactionProcessor, ledger: TransactionLedger) -> Self {
        Self { processor, ledger }
    }

    /// Validate and route a transaction request.
    ///
    /// # Flow
    ///
    /// 1. Non-positive amount → rejected outright, no ledger entry
    /// 2. Unsupported card range → decline recorded **before any credential
    ///    check**, balance and customer fields left unset
    /// 3. Otherwise delegate unchanged to the processor
    pub async fn submit(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, AppError> {
        tracing::info!(
            card = %card_tail(&request.card_number),
            "gateway: received transaction request"
        );

        if request.amount <= Decimal::ZERO {
            return Ok(TransactionResponse {
                success: false,
                message: "Amount must be positive".to_string(),
                status: STATUS_FAILED.to_string(),
                amount: request.amount,
                balance_after: None,
                timestamp: Utc::now(),
                transaction_reference: None,
            });
        }

        if !admits(&request.card_number) {
            tracing::info!(
                card = %card_tail(&request.card_number),
                "gateway: declining unsupported card range"
            );

            self.ledger
                .append(NewTransaction {
                    card_number: request.card_number.clone(),
                    transaction_type: request.transaction_type.clone(),
                    amount: request.amount,
                    balance_before: None,
                    balance_after: None,
                    status: STATUS_DECLINED.to_string(),
                    reason: Some(REASON_RANGE_NOT_SUPPORTED.to_string()),
                    customer_id: None,
                    customer_name: None,
                })
                .await?;

            return Ok(TransactionResponse {
                success: false,
                message: REASON_RANGE_NOT_SUPPORTED.to_string(),
                status: STATUS_DECLINED.to_string(),
                amount: request.amount,
                balance_after: None,
                timestamp: Utc::now(),
                transaction_reference: None,
            });
        }

        tracing::info!("gateway: routing transaction to processor");

        self.processor.process(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::visa_seed("4111111111111111", true)]
    #[case::visa_issued("4111036718422546", true)]
    #[case::mastercard_range("5111111111111118", false)]
    #[case::amex_range("371111111111111", false)]
    #[case::discover_range("6011111111111117", false)]
    #[case::empty("", false)]
    fn range_policy_admits_only_leading_four(#[case] card_number: &str, #[case] admitted: bool) {
        assert_eq!(admits(card_number), admitted);
    }
}

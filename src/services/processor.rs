//! Transaction processor — authorization and mutation stage.
//!
//! # Atomicity
//!
//! Each request runs inside a single database transaction. The card row is
//! resolved with a row lock (`FOR UPDATE`), so concurrent attempts against
//! the same card serialize and two withdrawals can never both observe the
//! same balance-before. On success, the balance update and the ledger row
//! commit together or not at all; on failure, only the ledger row commits
//! and the card is never touched.

use rust_decimal::Decimal;

use crate::{
    crypto::pin::hash_pin,
    db::DbPool,
    error::AppError,
    models::{
        card::Card,
        transaction::{
            NewTransaction, STATUS_FAILED, STATUS_SUCCESS, TYPE_TOPUP, TYPE_WITHDRAW,
            TransactionRequest, TransactionResponse,
        },
    },
    services::card_tail,
    store::{CardStore, TransactionLedger},
};

#[derive(Clone)]
pub struct TransactionProcessor {
    pool: DbPool,
    cards: CardStore,
    ledger: TransactionLedger,
}

impl TransactionProcessor {
    pub fn new(pool: DbPool, cards: CardStore, ledger: TransactionLedger) -> Self {
        Self {
            pool,
            cards,
            ledger,
        }
    }

    /// Authorize a gateway-admitted request and apply it.
    ///
    /// # Flow
    ///
    /// 1. Resolve and lock the card; miss → `Invalid card number`
    /// 2. Verify the PIN digest; mismatch → `Invalid PIN`
    /// 3. Reject disabled cards → `Card is inactive`
    /// 4. Withdrawals require sufficient funds → `Insufficient balance`
    /// 5. Unknown type values → `Invalid transaction type`
    /// 6. Apply the mutation, record the success row, commit
    ///
    /// Every outcome — including each failure — leaves exactly one ledger
    /// record behind.
    pub async fn process(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, AppError> {
        tracing::info!(
            card = %card_tail(&request.card_number),
            "processor: processing transaction"
        );

        let mut tx = self.pool.begin().await?;

        let Some(card) = self
            .cards
            .lock_by_card_number(&mut tx, &request.card_number)
            .await?
        else {
            tracing::warn!(
                card = %card_tail(&request.card_number),
                "processor: unknown card number"
            );
            return self.fail(tx, &request, "Invalid card number", None).await;
        };

        if hash_pin(&request.pin) != card.pin_hash {
            tracing::warn!(
                card = %card_tail(&request.card_number),
                "processor: PIN verification failed"
            );
            return self.fail(tx, &request, "Invalid PIN", Some(&card)).await;
        }

        if !card.active {
            tracing::warn!(
                card = %card_tail(&request.card_number),
                "processor: card is inactive"
            );
            return self
                .fail(tx, &request, "Card is inactive", Some(&card))
                .await;
        }

        let (balance_after, message) = match request.transaction_type.as_str() {
            TYPE_WITHDRAW if card.balance < request.amount => {
                tracing::warn!(
                    card = %card_tail(&request.card_number),
                    "processor: insufficient balance for withdrawal"
                );
                return self
                    .fail(tx, &request, "Insufficient balance", Some(&card))
                    .await;
            }
            TYPE_WITHDRAW => (card.balance - request.amount, "Withdrawal successful"),
            TYPE_TOPUP => (card.balance + request.amount, "Top-up successful"),
            other => {
                tracing::warn!(
                    transaction_type = %other,
                    "processor: invalid transaction type"
                );
                return self
                    .fail(tx, &request, "Invalid transaction type", Some(&card))
                    .await;
            }
        };

        let balance_before = card.balance;

        self.cards
            .update_balance(&mut tx, card.id, balance_after)
            .await?;

        let record = self
            .ledger
            .append_in_tx(
                &mut tx,
                NewTransaction {
                    card_number: request.card_number.clone(),
                    transaction_type: request.transaction_type.clone(),
                    amount: request.amount,
                    balance_before: Some(balance_before),
                    balance_after: Some(balance_after),
                    status: STATUS_SUCCESS.to_string(),
                    reason: None,
                    customer_id: Some(card.customer_id.clone()),
                    customer_name: Some(card.customer_name.clone()),
                },
            )
            .await?;

        // Both the balance mutation and the audit record become durable
        // here, or neither does.
        tx.commit().await?;

        tracing::info!(
            card = %card_tail(&request.card_number),
            balance = %balance_after,
            reference = record.id,
            "processor: transaction successful"
        );

        Ok(TransactionResponse {
            success: true,
            message: message.to_string(),
            status: STATUS_SUCCESS.to_string(),
            amount: request.amount,
            balance_after: Some(balance_after),
            timestamp: record.timestamp,
            transaction_reference: Some(record.id.to_string()),
        })
    }

    /// Record a failed attempt and commit it. The card row is never
    /// mutated on this path.
    ///
    /// Balance columns carry the card's unchanged balance, or zero when
    /// the card could not be resolved; customer fields stay unset in the
    /// unresolved case.
    async fn fail(
        &self,
        mut tx: sqlx::Transaction<'_, sqlx::Postgres>,
        request: &TransactionRequest,
        reason: &str,
        card: Option<&Card>,
    ) -> Result<TransactionResponse, AppError> {
        let balance = card.map_or(Decimal::ZERO, |c| c.balance);

        let record = self
            .ledger
            .append_in_tx(
                &mut tx,
                NewTransaction {
                    card_number: request.card_number.clone(),
                    transaction_type: request.transaction_type.clone(),
                    amount: request.amount,
                    balance_before: Some(balance),
                    balance_after: Some(balance),
                    status: STATUS_FAILED.to_string(),
                    reason: Some(reason.to_string()),
                    customer_id: card.map(|c| c.customer_id.clone()),
                    customer_name: card.map(|c| c.customer_name.clone()),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(TransactionResponse {
            success: false,
            message: reason.to_string(),
            status: STATUS_FAILED.to_string(),
            amount: request.amount,
            balance_after: Some(balance),
            timestamp: record.timestamp,
            transaction_reference: Some(record.id.to_string()),
        })
    }
}

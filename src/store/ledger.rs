//! Append-only transaction ledger.
//!
//! Every transaction attempt — success, decline, or failure — is recorded
//! here exactly once. The store only ever inserts and reads; there is no
//! update or delete path.

use sqlx::PgConnection;

use crate::{
    db::DbPool,
    error::AppError,
    models::transaction::{NewTransaction, TransactionRecord},
};

const INSERT_TRANSACTION: &str = r#"
    INSERT INTO transactions (
        card_number,
        transaction_type,
        amount,
        balance_before,
        balance_after,
        status,
        reason,
        customer_id,
        customer_name
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING *
"#;

/// Ledger over the shared pool.
#[derive(Clone)]
pub struct TransactionLedger {
    pool: DbPool,
}

impl TransactionLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a record; the store assigns id and timestamp.
    ///
    /// Used by the gateway's decline bookkeeping, which runs outside any
    /// card mutation.
    pub async fn append(&self, transaction: NewTransaction) -> Result<TransactionRecord, AppError> {
        let mut conn = self.pool.acquire().await?;

        self.append_with(&mut conn, transaction).await
    }

    /// Append within an already-open transaction.
    ///
    /// The processor uses this so the ledger row commits (or rolls back)
    /// together with the balance mutation.
    pub async fn append_in_tx(
        &self,
        conn: &mut PgConnection,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, AppError> {
        self.append_with(conn, transaction).await
    }

    async fn append_with(
        &self,
        conn: &mut PgConnection,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, AppError> {
        let record = sqlx::query_as::<_, TransactionRecord>(INSERT_TRANSACTION)
            .bind(&transaction.card_number)
            .bind(&transaction.transaction_type)
            .bind(transaction.amount)
            .bind(transaction.balance_before)
            .bind(transaction.balance_after)
            .bind(&transaction.status)
            .bind(&transaction.reason)
            .bind(&transaction.customer_id)
            .bind(&transaction.customer_name)
            .fetch_one(&mut *conn)
            .await?;

        Ok(record)
    }

    /// Full ledger, newest first. Audit path for administrators.
    pub async fn list_all(&self) -> Result<Vec<TransactionRecord>, AppError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// One customer's ledger entries, newest first.
    pub async fn list_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions WHERE customer_id = $1 ORDER BY timestamp DESC, id DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

//! Card persistence.
//!
//! The store is the encryption boundary: callers pass and receive plaintext
//! card numbers, while every row in the `cards` table carries ciphertext.
//! Because the cipher is deterministic, lookups encrypt the probe value and
//! match on ciphertext equality.

use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::{
    crypto::CardCipher,
    db::DbPool,
    error::AppError,
    models::card::{Card, NewCard},
};

const CARD_COLUMNS: &str = "id, card_number, pin_hash, balance, active, customer_id, customer_name";

/// Raw row shape; `card_number` is ciphertext here.
#[derive(sqlx::FromRow)]
struct CardRow {
    id: i64,
    card_number: String,
    pin_hash: String,
    balance: Decimal,
    active: bool,
    customer_id: String,
    customer_name: String,
}

/// Card store over the shared pool.
///
/// Clones share the pool and key material.
#[derive(Clone)]
pub struct CardStore {
    pool: DbPool,
    cipher: CardCipher,
}

impl CardStore {
    pub fn new(pool: DbPool, cipher: CardCipher) -> Self {
        Self { pool, cipher }
    }

    /// Decrypt a fetched row into the plaintext entity.
    fn into_card(&self, row: CardRow) -> Result<Card, AppError> {
        Ok(Card {
            id: row.id,
            card_number: self.cipher.decrypt(&row.card_number)?,
            pin_hash: row.pin_hash,
            balance: row.balance,
            active: row.active,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
        })
    }

    /// Look up a card by its plaintext number.
    ///
    /// The number is encrypted before the query; the plaintext never
    /// reaches the database.
    pub async fn find_by_card_number(
        &self,
        card_number: &str,
    ) -> Result<Option<Card>, AppError> {
        let encrypted = self.cipher.encrypt(card_number);

        let row = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE card_number = $1"
        ))
        .bind(&encrypted)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| self.into_card(r)).transpose()
    }

    /// All cards belonging to a customer, ordered by ascending id.
    ///
    /// Callers that expect a single card take the first entry; the id
    /// ordering makes that choice deterministic.
    pub async fn find_by_customer_id(&self, customer_id: &str) -> Result<Vec<Card>, AppError> {
        let rows = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| self.into_card(r)).collect()
    }

    /// Insert a new card; the store encrypts the number and assigns the id.
    ///
    /// A uniqueness violation on the (deterministic) ciphertext column
    /// surfaces as a database error — provisioning does not pre-check for
    /// collisions.
    pub async fn insert(&self, card: NewCard) -> Result<Card, AppError> {
        let mut conn = self.pool.acquire().await?;

        self.insert_with(&mut conn, card).await
    }

    /// Insert within an already-open transaction.
    pub async fn insert_in_tx(
        &self,
        conn: &mut PgConnection,
        card: NewCard,
    ) -> Result<Card, AppError> {
        self.insert_with(conn, card).await
    }

    async fn insert_with(
        &self,
        conn: &mut PgConnection,
        card: NewCard,
    ) -> Result<Card, AppError> {
        let encrypted = self.cipher.encrypt(&card.card_number);

        let row = sqlx::query_as::<_, CardRow>(&format!(
            r#"
            INSERT INTO cards (card_number, pin_hash, balance, active, customer_id, customer_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(&encrypted)
        .bind(&card.pin_hash)
        .bind(card.balance)
        .bind(card.active)
        .bind(&card.customer_id)
        .bind(&card.customer_name)
        .fetch_one(&mut *conn)
        .await?;

        self.into_card(row)
    }

    /// Resolve and row-lock a card inside an open transaction.
    ///
    /// `FOR UPDATE` serializes concurrent attempts against the same card,
    /// so two in-flight withdrawals cannot both observe the same
    /// balance-before. Attempts against different cards do not contend.
    pub async fn lock_by_card_number(
        &self,
        conn: &mut PgConnection,
        card_number: &str,
    ) -> Result<Option<Card>, AppError> {
        let encrypted = self.cipher.encrypt(card_number);

        let row = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE card_number = $1 FOR UPDATE"
        ))
        .bind(&encrypted)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(|r| self.into_card(r)).transpose()
    }

    /// Overwrite a card's balance inside an open transaction.
    ///
    /// The only mutation the schema permits after creation; callers must
    /// hold the row lock taken by `lock_by_card_number`.
    pub async fn update_balance(
        &self,
        conn: &mut PgConnection,
        card_id: i64,
        balance: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE cards SET balance = $1 WHERE id = $2")
            .bind(balance)
            .bind(card_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

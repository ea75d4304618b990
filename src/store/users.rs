//! User profile persistence.

use sqlx::PgConnection;

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{NewUser, User},
};

const USER_COLUMNS: &str = "id, username, password_hash, role, customer_id, active";

/// User store over the shared pool.
#[derive(Clone)]
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Number of existing profiles; onboarding derives the next customer
    /// identifier from it.
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Insert within an already-open transaction; the store assigns the id.
    pub async fn insert_in_tx(
        &self,
        conn: &mut PgConnection,
        user: NewUser,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, role, customer_id, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(&user.customer_id)
        .bind(user.active)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }
}

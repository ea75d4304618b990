//! Transaction HTTP handlers.
//!
//! - `POST /api/transaction` — submit a top-up or withdrawal
//! - `GET /api/transactions/all` — full audit ledger (admin view)
//! - `GET /api/transactions/customer/{customer_id}` — one customer's ledger

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    models::transaction::{
        TYPE_TOPUP, TYPE_WITHDRAW, TransactionRecord, TransactionRequest, TransactionResponse,
    },
    state::AppState,
};

/// Submit a transaction to the engine.
///
/// # Request Body
///
/// ```json
/// {
///   "cardNumber": "4111111111111111",
///   "pin": "1234",
///   "amount": "100.00",
///   "type": "topup"
/// }
/// ```
///
/// # Validation
///
/// Structurally invalid requests (missing credentials, unknown type) are
/// rejected with 400 before anything is persisted. Everything that reaches
/// the engine produces exactly one ledger record, and the engine's declines
/// and failures come back as 200 responses with `success: false`.
pub async fn submit_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, AppError> {
    if request.card_number.is_empty() || request.pin.is_empty() {
        return Err(AppError::InvalidRequest(
            "cardNumber and pin are required".to_string(),
        ));
    }

    if request.transaction_type != TYPE_WITHDRAW && request.transaction_type != TYPE_TOPUP {
        return Err(AppError::InvalidRequest(format!(
            "type must be '{TYPE_WITHDRAW}' or '{TYPE_TOPUP}'"
        )));
    }

    let response = state.gateway.submit(request).await?;

    Ok(Json(response))
}

/// Full ledger, newest first. Audit view for administrators.
pub async fn list_all_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let records = state.ledger.list_all().await?;

    Ok(Json(records))
}

/// One customer's ledger entries, newest first.
pub async fn list_customer_transactions(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let records = state.ledger.list_by_customer(&customer_id).await?;

    Ok(Json(records))
}

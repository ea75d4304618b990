//! Customer onboarding and card handlers.
//!
//! - `POST /api/customers` — onboard a customer (profile + default card)
//! - `GET /api/customers/{customer_id}/card` — the customer's card
//! - `POST /api/customers/{customer_id}/card` — issue an additional card

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{
        card::CardResponse,
        user::{CreateCustomerRequest, UserResponse},
    },
    state::AppState,
};

/// Response for a successful onboarding: the created profile and its
/// issued default card.
#[derive(Debug, Serialize)]
pub struct CreateCustomerResponse {
    pub user: UserResponse,
    pub card: CardResponse,
}

/// Request body for issuing an additional card to an existing customer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCardRequest {
    /// Name stamped on the card and denormalized into ledger entries
    pub display_name: String,
}

/// Onboard a new customer.
///
/// Creates the profile and issues exactly one default card. A username,
/// customer-id, or card-number collision fails the whole onboarding; no
/// partial state is left behind.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<CreateCustomerResponse>, AppError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "username and password are required".to_string(),
        ));
    }

    let (user, card) = state.accounts.create_customer(request).await?;

    Ok(Json(CreateCustomerResponse {
        user: user.into(),
        card: card.into(),
    }))
}

/// Look up a customer's card for the balance dashboard.
///
/// When a customer holds more than one card, the first by ascending id
/// wins. 404 when the customer has no card.
pub async fn get_customer_card(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<CardResponse>, AppError> {
    let cards = state.cards.find_by_customer_id(&customer_id).await?;

    let card = cards.into_iter().next().ok_or(AppError::CardNotFound)?;

    Ok(Json(card.into()))
}

/// Issue an additional card to an existing customer.
///
/// The customer must already be provisioned; the card itself is generated
/// exactly like the onboarding default (supported range, Luhn check digit,
/// default PIN, starting balance).
pub async fn issue_card(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<IssueCardRequest>,
) -> Result<Json<CardResponse>, AppError> {
    if request.display_name.is_empty() {
        return Err(AppError::InvalidRequest(
            "displayName is required".to_string(),
        ));
    }

    state
        .users
        .find_by_customer_id(&customer_id)
        .await?
        .ok_or(AppError::CustomerNotFound)?;

    let card = state
        .accounts
        .issue_card(&customer_id, &request.display_name)
        .await?;

    Ok(Json(card.into()))
}

//! Login endpoint.
//!
//! A single endpoint serves both credential shapes: card number + PIN and
//! username + password. The configured strategies are tried in order; the
//! response never reveals which strategy ran or which check rejected the
//! attempt.

use axum::{Json, extract::State};

use crate::{
    auth::{self, AuthOutcome, Identity},
    error::AppError,
    state::AppState,
};

/// Authenticate a login attempt.
///
/// # Request Body
///
/// Either of:
///
/// ```json
/// { "cardNumber": "4111111111111111", "pin": "1234" }
/// ```
/// ```json
/// { "username": "john_doe", "password": "password123" }
/// ```
///
/// # Response
///
/// - **200**: `{ "username": "john_doe", "role": "CUSTOMER" }`
/// - **401**: generic invalid-credentials error, for every failure variant
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<auth::Credentials>,
) -> Result<Json<Identity>, AppError> {
    match auth::authenticate(&state.authenticators, &credentials).await? {
        AuthOutcome::Success(identity) => {
            tracing::info!(username = %identity.username, "login successful");
            Ok(Json(identity))
        }
        AuthOutcome::Failure(reason) => {
            // Variants stay distinguishable here and in logs only; the
            // response body is the same for all of them.
            tracing::warn!(?reason, "login rejected");
            Err(AppError::Unauthorized)
        }
        AuthOutcome::Abstain => Err(AppError::Unauthorized),
    }
}

//! Error types and HTTP error response handling.
//!
//! This module defines all request-path application errors and how they are
//! converted into HTTP responses with appropriate status codes and JSON
//! bodies.
//!
//! Transaction outcomes (`declined`, `failed`) are NOT errors: they are
//! recorded engine results returned as a normal response body. `AppError`
//! covers the cases where the request itself cannot be served.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::crypto::CryptoError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Database Errors**: any sqlx::Error; no partial writes reach the
///   caller because every engine unit of work runs in one transaction
/// - **Crypto Errors**: cipher malfunction on stored card-number material
/// - **Authentication Errors**: all authentication failures collapse to one
///   variant so the response cannot be used to enumerate accounts
/// - **Resource Errors**: requested card/customer not found on read paths
/// - **Validation Errors**: malformed request data, rejected before any
///   persistence
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (connection error, query error,
    /// constraint violation).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored ciphertext could not be processed. The key itself is
    /// validated at startup, so this indicates corrupt or tampered data.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Authentication failed. Deliberately carries no detail about which
    /// check rejected the attempt.
    #[error("Invalid credentials")]
    Unauthorized,

    /// No card exists for the requested customer.
    #[error("Card not found")]
    CardNotFound,

    /// Customer profile does not exist.
    #[error("Customer not found")]
    CustomerNotFound,

    /// Request body or parameters are invalid. The String contains details
    /// about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401 Unauthorized
/// - `CardNotFound` / `CustomerNotFound` → 404 Not Found
/// - `InvalidRequest` → 400 Bad Request
/// - `Database` / `Crypto` → 500 Internal Server Error (details hidden
///   from the client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::CardNotFound => {
                (StatusCode::NOT_FOUND, "card_not_found", self.to_string())
            }
            AppError::CustomerNotFound => (
                StatusCode::NOT_FOUND,
                "customer_not_found",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Database(_) | AppError::Crypto(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to the authentication strategies or services
//! 3. Returns an HTTP response (JSON, status code)

/// Strategy-driven login endpoint
pub mod auth;
/// Customer onboarding and card lookup endpoints
pub mod customers;
/// Service health endpoint
pub mod health;
/// Transaction submission and ledger audit endpoints
pub mod transactions;

//! Card-Banking Backend - Main Application Entry Point
//!
//! This is a REST API server for a proof-of-concept card-banking system:
//! customers authenticate with a card number + PIN or username + password,
//! top up or withdraw against a card balance, and administrators audit all
//! transactions.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Card numbers**: encrypted at rest with a deterministic cipher,
//!   looked up by ciphertext equality
//! - **Credentials**: SHA-256 digests of PINs and passwords
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the card cipher from the configured key (bad key = fatal)
//! 3. Create database connection pool and run migrations
//! 4. Build HTTP router over the shared state
//! 5. Start server on configured port

mod auth;
mod config;
mod crypto;
mod db;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod store;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{crypto::CardCipher, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // A malformed encryption key must stop the process here, before
    // anything touches stored card data.
    let cipher = CardCipher::new(&config.encryption_key).context("invalid ENCRYPTION_KEY")?;
    tracing::info!("Card cipher initialized");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState::new(pool, cipher);

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        // Authentication (card/PIN or username/password)
        .route("/api/login", post(handlers::auth::login))
        // Transaction engine
        .route(
            "/api/transaction",
            post(handlers::transactions::submit_transaction),
        )
        // Ledger audit views
        .route(
            "/api/transactions/all",
            get(handlers::transactions::list_all_transactions),
        )
        .route(
            "/api/transactions/customer/{customer_id}",
            get(handlers::transactions::list_customer_transactions),
        )
        // Customer onboarding and card issuance
        .route("/api/customers", post(handlers::customers::create_customer))
        .route(
            "/api/customers/{customer_id}/card",
            get(handlers::customers::get_customer_card).post(handlers::customers::issue_card),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state with all handlers via State extraction
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    axum::serve(listener, app).await?;

    Ok(())
}

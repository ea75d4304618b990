//! Application configuration management.
//!
//! Configuration is loaded from environment variables (with optional `.env`
//! file support) and deserialized into a type-safe struct via `envy`.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `ENCRYPTION_KEY` (required): 16-byte AES key for card-number
///   encryption; validated at startup, never reloaded at runtime
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub encryption_key: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Attempts to load a `.env` file first (optional), then reads the
    /// environment. A missing `DATABASE_URL` or `ENCRYPTION_KEY` is a
    /// startup error; key *length* is validated separately when the cipher
    /// is constructed.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }
}

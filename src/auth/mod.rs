//! Authentication strategies.
//!
//! A login attempt carries whichever credential fields the client supplied.
//! Each strategy inspects the shape and either *abstains* (the fields it
//! understands are absent or malformed — another strategy may still match),
//! *fails* (the shape matched but the credentials are wrong), or *succeeds*
//! with an authenticated identity. Strategies are tried in a defined order
//! until one returns a non-abstain outcome.
//!
//! Keeping abstention distinct from failure matters: a strategy that
//! doesn't recognize the input must not mask a real credential error from a
//! later strategy, and vice versa.
//!
//! Identity always flows as an explicit value through the call chain; the
//! engine holds no ambient "current user" state.

pub mod card_pin;
pub mod password;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use card_pin::CardPinAuthenticator;
pub use password::PasswordAuthenticator;

/// Credential material presented with a login attempt.
///
/// Fields are optional because a single attempt carries only one
/// credential pair; strategies pick out the fields they understand.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub card_number: Option<String>,
    pub pin: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// An authenticated identity.
///
/// Carries only the username and role — no residual credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

/// Why an authentication attempt was rejected.
///
/// The variants stay distinguishable inside the engine (and in logs), but
/// the HTTP boundary collapses them all into one generic message so the
/// response cannot be used to enumerate cards or accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Unknown card/username or wrong PIN/password
    InvalidCredentials,
    /// Credentials matched but the card or profile is disabled
    AccountDisabled,
    /// The card resolved but no user profile exists for its customer
    AccountNotProvisioned,
}

/// Result of running one strategy against one set of credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The request shape does not match this strategy; try the next one
    Abstain,
    Failure(AuthFailure),
    Success(Identity),
}

/// A single authentication strategy.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AppError>;
}

/// Run the configured strategies in order until one succeeds, or all have
/// abstained or failed.
///
/// Exactly one success is enough; an earlier failure does not stop a later
/// strategy from being tried. When nothing succeeds, the first real
/// failure is reported (it came from the strategy that recognized the
/// input); all-abstain resolves to plain invalid credentials.
pub async fn authenticate(
    strategies: &[Box<dyn Authenticator>],
    credentials: &Credentials,
) -> Result<AuthOutcome, AppError> {
    let mut first_failure: Option<AuthFailure> = None;

    for strategy in strategies {
        match strategy.authenticate(credentials).await? {
            AuthOutcome::Abstain => continue,
            AuthOutcome::Success(identity) => return Ok(AuthOutcome::Success(identity)),
            AuthOutcome::Failure(reason) => {
                first_failure.get_or_insert(reason);
            }
        }
    }

    Ok(AuthOutcome::Failure(
        first_failure.unwrap_or(AuthFailure::InvalidCredentials),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub strategy with a fixed outcome.
    struct Fixed(AuthOutcome);

    #[async_trait]
    impl Authenticator for Fixed {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthOutcome, AppError> {
            Ok(self.0.clone())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            card_number: None,
            pin: None,
            username: None,
            password: None,
        }
    }

    fn identity() -> Identity {
        Identity {
            username: "john_doe".to_string(),
            role: "CUSTOMER".to_string(),
        }
    }

    #[tokio::test]
    async fn abstaining_strategy_defers_to_the_next() {
        let strategies: Vec<Box<dyn Authenticator>> = vec![
            Box::new(Fixed(AuthOutcome::Abstain)),
            Box::new(Fixed(AuthOutcome::Success(identity()))),
        ];

        let outcome = authenticate(&strategies, &credentials()).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Success(identity()));
    }

    #[tokio::test]
    async fn earlier_failure_does_not_mask_a_later_success() {
        let strategies: Vec<Box<dyn Authenticator>> = vec![
            Box::new(Fixed(AuthOutcome::Failure(AuthFailure::InvalidCredentials))),
            Box::new(Fixed(AuthOutcome::Success(identity()))),
        ];

        let outcome = authenticate(&strategies, &credentials()).await.unwrap();

        assert_eq!(outcome, AuthOutcome::Success(identity()));
    }

    #[tokio::test]
    async fn first_failure_wins_when_nothing_succeeds() {
        let strategies: Vec<Box<dyn Authenticator>> = vec![
            Box::new(Fixed(AuthOutcome::Failure(AuthFailure::AccountDisabled))),
            Box::new(Fixed(AuthOutcome::Failure(AuthFailure::InvalidCredentials))),
        ];

        let outcome = authenticate(&strategies, &credentials()).await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure(AuthFailure::AccountDisabled)
        );
    }

    #[tokio::test]
    async fn all_abstain_resolves_to_invalid_credentials() {
        let strategies: Vec<Box<dyn Authenticator>> = vec![
            Box::new(Fixed(AuthOutcome::Abstain)),
            Box::new(Fixed(AuthOutcome::Abstain)),
        ];

        let outcome = authenticate(&strategies, &credentials()).await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure(AuthFailure::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn empty_strategy_set_fails_closed() {
        let strategies: Vec<Box<dyn Authenticator>> = vec![];

        let outcome = authenticate(&strategies, &credentials()).await.unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Failure(AuthFailure::InvalidCredentials)
        );
    }
}

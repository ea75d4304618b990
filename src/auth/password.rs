//! Username + password authentication strategy.

use async_trait::async_trait;

use crate::{
    auth::{AuthFailure, AuthOutcome, Authenticator, Credentials, Identity},
    crypto::pin::hash_password,
    error::AppError,
    store::UserStore,
};

/// Authenticates a (username, password) pair against the user store.
pub struct PasswordAuthenticator {
    users: UserStore,
}

impl PasswordAuthenticator {
    pub fn new(users: UserStore) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AppError> {
        let (Some(username), Some(password)) = (&credentials.username, &credentials.password)
        else {
            return Ok(AuthOutcome::Abstain);
        };

        if username.is_empty() || password.is_empty() {
            return Ok(AuthOutcome::Abstain);
        }

        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(AuthOutcome::Failure(AuthFailure::InvalidCredentials));
        };

        if hash_password(password) != user.password_hash {
            return Ok(AuthOutcome::Failure(AuthFailure::InvalidCredentials));
        }

        if !user.active {
            tracing::warn!(username = %user.username, "login attempt on inactive profile");
            return Ok(AuthOutcome::Failure(AuthFailure::AccountDisabled));
        }

        Ok(AuthOutcome::Success(Identity {
            username: user.username,
            role: user.role,
        }))
    }
}

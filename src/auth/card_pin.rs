//! Card number + PIN authentication strategy.

use async_trait::async_trait;

use crate::{
    auth::{AuthFailure, AuthOutcome, Authenticator, Credentials, Identity},
    crypto::pin::hash_pin,
    error::AppError,
    store::{CardStore, UserStore},
};

/// Shape gate: exactly 16 ASCII digits.
///
/// Anything else makes this strategy abstain rather than fail, so that a
/// username which happens to arrive in the card-number slot falls through
/// to the password strategy.
fn is_card_number(value: &str) -> bool {
    value.len() == 16 && value.bytes().all(|b| b.is_ascii_digit())
}

/// Authenticates a (card number, PIN) pair against the card store.
pub struct CardPinAuthenticator {
    cards: CardStore,
    users: UserStore,
}

impl CardPinAuthenticator {
    pub fn new(cards: CardStore, users: UserStore) -> Self {
        Self { cards, users }
    }
}

#[async_trait]
impl Authenticator for CardPinAuthenticator {
    /// # Flow
    ///
    /// 1. Abstain unless a 16-digit card number and a PIN are present
    /// 2. Resolve the card (plaintext in; the store encrypts for lookup)
    /// 3. Digest the presented PIN and compare to the stored hash
    /// 4. Reject disabled cards
    /// 5. Resolve the owning customer's profile for username and role
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AppError> {
        let (Some(card_number), Some(pin)) = (&credentials.card_number, &credentials.pin) else {
            return Ok(AuthOutcome::Abstain);
        };

        if !is_card_number(card_number) {
            return Ok(AuthOutcome::Abstain);
        }

        let Some(card) = self.cards.find_by_card_number(card_number).await? else {
            return Ok(AuthOutcome::Failure(AuthFailure::InvalidCredentials));
        };

        if hash_pin(pin) != card.pin_hash {
            return Ok(AuthOutcome::Failure(AuthFailure::InvalidCredentials));
        }

        if !card.active {
            tracing::warn!(customer_id = %card.customer_id, "login attempt on inactive card");
            return Ok(AuthOutcome::Failure(AuthFailure::AccountDisabled));
        }

        let Some(user) = self.users.find_by_customer_id(&card.customer_id).await? else {
            tracing::warn!(customer_id = %card.customer_id, "card has no user profile");
            return Ok(AuthOutcome::Failure(AuthFailure::AccountNotProvisioned));
        };

        Ok(AuthOutcome::Success(Identity {
            username: user.username,
            role: user.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::standard_visa("4111111111111111", true)]
    #[case::non_visa("5111111111111118", true)]
    #[case::too_short("411111111111111", false)]
    #[case::too_long("41111111111111111", false)]
    #[case::letters("411111111111111a", false)]
    #[case::username_shaped("john_doe", false)]
    #[case::embedded_space("4111 11111111111", false)]
    #[case::empty("", false)]
    fn card_number_shape_gate(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_card_number(value), expected);
    }
}

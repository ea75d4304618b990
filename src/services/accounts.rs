//! Customer onboarding and card issuance.
//!
//! Every new customer receives exactly one default card: a Luhn-valid
//! number in the supported routing range, a fixed default PIN, and a fixed
//! starting balance.

use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    crypto::pin::{hash_password, hash_pin},
    db::DbPool,
    error::AppError,
    models::{
        card::{Card, NewCard},
        user::{CreateCustomerRequest, NewUser, ROLE_CUSTOMER, User},
    },
    services::card_tail,
    store::{CardStore, UserStore},
};

/// Network prefix for issued card numbers. Keeps every issued card inside
/// the range the gateway admits.
const CARD_PREFIX: &str = "4111";

/// Default PIN assigned to newly issued cards in this environment.
const DEFAULT_PIN: &str = "1234";

/// Starting balance granted to newly issued cards: 1000.00.
fn starting_balance() -> Decimal {
    Decimal::new(1_000_00, 2)
}

#[derive(Clone)]
pub struct CustomerAccountService {
    pool: DbPool,
    users: UserStore,
    cards: CardStore,
}

impl CustomerAccountService {
    pub fn new(pool: DbPool, users: UserStore, cards: CardStore) -> Self {
        Self { pool, users, cards }
    }

    /// Create a customer profile and issue its default card in one unit of
    /// work.
    ///
    /// The customer identifier is allocated sequentially (`CUST001`, …).
    /// Uniqueness of usernames, customer ids, and card numbers is enforced
    /// by the store; a violation surfaces as a provisioning failure, it is
    /// not retried here.
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<(User, Card), AppError> {
        let customer_id = format!("CUST{:03}", self.users.count().await? + 1);
        let display_name = format!("{} {}", request.first_name, request.last_name);

        let mut tx = self.pool.begin().await?;

        let user = self
            .users
            .insert_in_tx(
                &mut tx,
                NewUser {
                    username: request.username,
                    password_hash: hash_password(&request.password),
                    role: ROLE_CUSTOMER.to_string(),
                    customer_id: customer_id.clone(),
                    active: true,
                },
            )
            .await?;

        let card = self
            .cards
            .insert_in_tx(&mut tx, new_default_card(&customer_id, &display_name))
            .await?;

        tx.commit().await?;

        tracing::info!(
            customer_id = %customer_id,
            card = %card_tail(&card.card_number),
            "onboarded customer with default card"
        );

        Ok((user, card))
    }

    /// Issue one default card for an existing customer.
    ///
    /// Number generation does not pre-check for collisions; the unique
    /// constraint on the stored (deterministic) ciphertext is the backstop.
    pub async fn issue_card(
        &self,
        customer_id: &str,
        display_name: &str,
    ) -> Result<Card, AppError> {
        let card = self
            .cards
            .insert(new_default_card(customer_id, display_name))
            .await?;

        tracing::info!(
            customer_id = %customer_id,
            card = %card_tail(&card.card_number),
            "issued card"
        );

        Ok(card)
    }
}

fn new_default_card(customer_id: &str, display_name: &str) -> NewCard {
    NewCard {
        card_number: generate_card_number(),
        pin_hash: hash_pin(DEFAULT_PIN),
        balance: starting_balance(),
        active: true,
        customer_id: customer_id.to_string(),
        customer_name: display_name.to_string(),
    }
}

/// Generate a 16-digit card number: fixed network prefix, random 8-digit
/// body, trailing Luhn check digit computed over the first 15 digits.
fn generate_card_number() -> String {
    let body: u32 = rand::rng().random_range(0..100_000_000);
    let base = format!("{CARD_PREFIX}{body:08}");

    format!("{base}{}", luhn_check_digit(&base))
}

/// Standard Luhn check digit: double every second digit counting from the
/// rightmost, subtract 9 from doubles above 9, sum all digits, then
/// `(10 - sum % 10) % 10`.
fn luhn_check_digit(digits: &str) -> u32 {
    let mut sum = 0;
    let mut double = true;

    for ch in digits.chars().rev() {
        let mut digit = ch.to_digit(10).unwrap_or(0);

        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }

        sum += digit;
        double = !double;
    }

    (10 - sum % 10) % 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Standard full-string Luhn validation (check digit included).
    fn is_luhn_valid(number: &str) -> bool {
        let mut sum = 0;
        let mut double = false;

        for ch in number.chars().rev() {
            let Some(mut digit) = ch.to_digit(10) else {
                return false;
            };

            if double {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }

            sum += digit;
            double = !double;
        }

        sum % 10 == 0
    }

    #[rstest]
    #[case::classic_visa_test_number("4111111111111111")]
    #[case::second_visa_test_number("4012888888881881")]
    fn known_valid_numbers_pass_validation(#[case] number: &str) {
        assert!(is_luhn_valid(number));
    }

    #[rstest]
    #[case::flipped_last_digit("4111111111111112")]
    #[case::non_digit("411111111111111a")]
    fn invalid_numbers_fail_validation(#[case] number: &str) {
        assert!(!is_luhn_valid(number));
    }

    #[rstest]
    #[case("411111111111111", 1)]
    #[case("401288888888188", 1)]
    fn check_digit_reproduces_known_cards(#[case] base: &str, #[case] expected: u32) {
        assert_eq!(luhn_check_digit(base), expected);
    }

    #[test]
    fn check_digit_completes_any_base_to_a_valid_number() {
        let base = "411103671842254";
        let check = luhn_check_digit(base);

        assert!(is_luhn_valid(&format!("{base}{check}")));
    }

    #[test]
    fn generated_numbers_have_the_issuing_shape() {
        for _ in 0..100 {
            let number = generate_card_number();

            assert_eq!(number.len(), 16);
            assert!(number.starts_with(CARD_PREFIX));
            assert!(number.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn generated_numbers_pass_luhn_validation() {
        for _ in 0..100 {
            assert!(is_luhn_valid(&generate_card_number()));
        }
    }

    #[test]
    fn starting_balance_is_one_thousand() {
        assert_eq!(starting_balance(), Decimal::new(100_000, 2));
    }
}

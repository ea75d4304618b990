//! Shared application state.

use std::sync::Arc;

use crate::{
    auth::{Authenticator, CardPinAuthenticator, PasswordAuthenticator},
    crypto::CardCipher,
    db::DbPool,
    services::{CustomerAccountService, TransactionGateway, TransactionProcessor},
    store::{CardStore, TransactionLedger, UserStore},
};

/// State shared with every handler via axum's `State` extraction.
///
/// Everything here is cheap to clone: the stores share the pool, the
/// cipher shares key material, and the strategy set lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub cards: CardStore,
    pub users: UserStore,
    pub ledger: TransactionLedger,
    pub gateway: TransactionGateway,
    pub accounts: CustomerAccountService,

    /// Authentication strategies in the order they are tried: card/PIN
    /// first, then username/password. Fixed at startup.
    pub authenticators: Arc<Vec<Box<dyn Authenticator>>>,
}

impl AppState {
    pub fn new(pool: DbPool, cipher: CardCipher) -> Self {
        let cards = CardStore::new(pool.clone(), cipher);
        let users = UserStore::new(pool.clone());
        let ledger = TransactionLedger::new(pool.clone());

        let processor = TransactionProcessor::new(pool.clone(), cards.clone(), ledger.clone());
        let gateway = TransactionGateway::new(processor, ledger.clone());
        let accounts = CustomerAccountService::new(pool.clone(), users.clone(), cards.clone());

        let authenticators: Arc<Vec<Box<dyn Authenticator>>> = Arc::new(vec![
            Box::new(CardPinAuthenticator::new(cards.clone(), users.clone())),
            Box::new(PasswordAuthenticator::new(users.clone())),
        ]);

        Self {
            pool,
            cards,
            users,
            ledger,
            gateway,
            accounts,
            authenticators,
        }
    }
}

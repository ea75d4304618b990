//! Cryptographic primitives for credential and card-number protection.
//!
//! Two concerns live here:
//! - `cipher`: reversible, deterministic encryption of card numbers for
//!   at-rest storage and equality-based lookup
//! - `pin`: one-way digests of PINs and passwords for verification without
//!   storing plaintext

pub mod cipher;
pub mod pin;

pub use cipher::{CardCipher, CryptoError};

//! Deterministic card-number encryption.
//!
//! Card numbers are stored encrypted and resolved by exact ciphertext
//! equality, so the same plaintext must always map to the same ciphertext.
//! That constraint rules out randomized-IV schemes; this cipher uses
//! AES-128-ECB with PKCS7 padding and Base64-encodes the result.
//!
//! ECB carries no integrity tag, which leaves the stored ciphertext open to
//! tampering. Known limitation of the lookup-by-ciphertext scheme.

use aes::Aes128;
use aes::cipher::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, block_padding::Pkcs7};

/// AES-128 key length in bytes.
const KEY_LEN: usize = 16;

/// Cipher malfunction. Key problems are caught at construction (startup);
/// `Malformed` covers everything that can go wrong with stored ciphertext.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The configured key is not a valid AES-128 key.
    #[error("encryption key must be {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Ciphertext could not be decoded, decrypted, or unpadded.
    #[error("malformed ciphertext")]
    Malformed,
}

/// Deterministic symmetric cipher for card numbers.
///
/// Holds the AES key loaded once from configuration at process start; the
/// key is never rotated at runtime. Cloning shares the same key material.
#[derive(Clone)]
pub struct CardCipher {
    key: Key<Aes128>,
}

impl CardCipher {
    /// Build a cipher from the configured secret.
    ///
    /// The secret's UTF-8 bytes are used directly as the AES-128 key, so it
    /// must be exactly 16 bytes long. A wrong-length key is a fatal startup
    /// error, not a runtime one.
    pub fn new(secret: &str) -> Result<Self, CryptoError> {
        let bytes = secret.as_bytes();
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength(bytes.len()));
        }

        Ok(Self {
            key: *Key::<Aes128>::from_slice(bytes),
        })
    }

    /// Encrypt a plaintext card number to its Base64 storage form.
    ///
    /// Deterministic: equal inputs produce equal outputs, which is what
    /// makes the ciphertext usable as a lookup key.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let ciphertext = ecb::Encryptor::<Aes128>::new(&self.key)
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        BASE64.encode(ciphertext)
    }

    /// Decrypt a Base64 ciphertext back to the plaintext card number.
    ///
    /// Any failure (bad Base64, bad block length, bad padding, non-UTF-8
    /// plaintext) surfaces as `CryptoError::Malformed` — never silently
    /// swallowed.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CryptoError> {
        let bytes = BASE64
            .decode(ciphertext)
            .map_err(|_| CryptoError::Malformed)?;

        let plaintext = ecb::Decryptor::<Aes128>::new(&self.key)
            .decrypt_padded_vec_mut::<Pkcs7>(&bytes)
            .map_err(|_| CryptoError::Malformed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_KEY: &str = "0123456789abcdef";

    fn cipher() -> CardCipher {
        CardCipher::new(TEST_KEY).expect("valid 16-byte key")
    }

    #[rstest]
    #[case("4111111111111111")]
    #[case("4222222222222222")]
    #[case("5111111111111118")]
    #[case("4000000000000000")]
    fn round_trip_restores_plaintext(#[case] card_number: &str) {
        let cipher = cipher();
        let encrypted = cipher.encrypt(card_number);

        assert_ne!(encrypted, card_number);
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), card_number);
    }

    #[test]
    fn encryption_is_deterministic() {
        let cipher = cipher();

        assert_eq!(
            cipher.encrypt("4111111111111111"),
            cipher.encrypt("4111111111111111")
        );
    }

    #[test]
    fn different_plaintexts_produce_different_ciphertexts() {
        let cipher = cipher();

        assert_ne!(
            cipher.encrypt("4111111111111111"),
            cipher.encrypt("4222222222222222")
        );
    }

    #[test]
    fn same_key_across_instances_produces_same_ciphertext() {
        let a = CardCipher::new(TEST_KEY).unwrap();
        let b = CardCipher::new(TEST_KEY).unwrap();

        assert_eq!(a.encrypt("4111111111111111"), b.encrypt("4111111111111111"));
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("seventeen bytes!!")]
    fn rejects_wrong_length_keys(#[case] secret: &str) {
        let result = CardCipher::new(secret);

        assert!(matches!(result, Err(CryptoError::InvalidKeyLength(_))));
    }

    #[test]
    fn decrypt_rejects_invalid_base64() {
        let result = cipher().decrypt("not base64 at all!");

        assert!(matches!(result, Err(CryptoError::Malformed)));
    }

    #[test]
    fn decrypt_rejects_truncated_ciphertext() {
        let cipher = cipher();
        let encrypted = cipher.encrypt("4111111111111111");
        // Drop the last block boundary worth of data.
        let truncated = &encrypted[..encrypted.len() / 2];

        assert!(matches!(
            cipher.decrypt(truncated),
            Err(CryptoError::Malformed)
        ));
    }

    #[test]
    fn decrypt_with_wrong_key_fails_or_garbles() {
        let encrypted = cipher().encrypt("4111111111111111");
        let other = CardCipher::new("fedcba9876543210").unwrap();

        // Wrong key either trips the padding check or yields junk that is
        // not the original number.
        match other.decrypt(&encrypted) {
            Ok(plaintext) => assert_ne!(plaintext, "4111111111111111"),
            Err(error) => assert!(matches!(error, CryptoError::Malformed)),
        }
    }
}

//! One-way credential digests.
//!
//! PINs and passwords are stored as SHA-256 hex digests and verified by
//! recomputing the digest over the presented credential. The digest is a
//! pure function of the input bytes, so output is identical across process
//! restarts.
//!
//! No salt is used for PINs: the plaintext space is 10,000 four-digit
//! values, so the digest is only a plaintext-at-rest guard, not a
//! brute-force one.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a PIN.
pub fn hash_pin(pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());

    hex::encode(hasher.finalize())
}

/// Password digest for the username/password strategy. Same construction as
/// the PIN digest.
pub fn hash_password(password: &str) -> String {
    hash_pin(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_sha256_vector() {
        // SHA-256("1234")
        assert_eq!(
            hash_pin("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(hash_pin("5678"), hash_pin("5678"));
    }

    #[test]
    fn different_pins_produce_different_digests() {
        assert_ne!(hash_pin("1234"), hash_pin("1235"));
    }

    #[test]
    fn digest_is_fixed_length_lowercase_hex() {
        let digest = hash_pin("9999");

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn password_digest_uses_same_construction() {
        assert_eq!(hash_password("password123"), hash_pin("password123"));
    }
}

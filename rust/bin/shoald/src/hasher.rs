//! Salted SHA-256 password digests.
//!
//! The concrete digest scheme lives in the binary, behind the accounts
//! module's `PasswordHasher` trait, so it can be swapped without touching
//! the module. Stored format: `{hex salt}${hex digest}`.

use accounts::hasher::PasswordHasher;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub struct SaltedSha256;

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl PasswordHasher for SaltedSha256 {
    fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        format!("{}${}", hex::encode(salt), digest(&salt, password))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, expected)) = stored.split_once('$') else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        digest(&salt, password) == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_roundtrip() {
        let h = SaltedSha256;
        let stored = h.hash("hunter2");
        assert!(h.verify("hunter2", &stored));
        assert!(!h.verify("hunter3", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let h = SaltedSha256;
        assert_ne!(h.hash("hunter2"), h.hash("hunter2"));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        let h = SaltedSha256;
        assert!(!h.verify("pw", "not-a-digest"));
        assert!(!h.verify("pw", "zzzz$abcd"));
    }
}

//! Per-user API keys
//!
//! Every user gets one random key at signup. Session tokens embed it and
//! are only honoured while it still matches the key on the user row.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a new random API key (16 bytes = 32 hex chars)
pub fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 16] = rng.gen();
    hex::encode(random_bytes)
}

/// SHA-256 digest of a key, hex encoded
pub fn digest_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a presented key with the stored one via their digests, so the
/// comparison never runs over the raw key bytes.
pub fn verify_api_key(presented: &str, stored: &str) -> bool {
    digest_api_key(presented) == digest_api_key(stored)
}

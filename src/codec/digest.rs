//! Truncated SHA-256 digests.

use crate::types::KEY_LEN;
use sha2::{Digest, Sha256};

/// Hash a canonical string and keep the first [`KEY_LEN`] hex characters.
///
/// 64 bits of digest is plenty for an ephemeral, non-adversarial key space.
/// Do not reuse this for anything security sensitive.
pub fn digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(KEY_LEN);
    hex
}

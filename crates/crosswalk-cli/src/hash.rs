#![deny(unsafe_code)]

use sha2::Digest;

const SHORT_HASH_LEN: usize = 12;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Leading characters of a hex digest, for tables.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

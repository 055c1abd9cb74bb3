use std::path::Path;

use sha1::{Digest, Sha1};
use tracing::warn;

use crate::core::error::{CacheError, CacheResult};

/// Lower-case hex SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn hash_matches(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected)
}

/// Check an in-memory buffer against `expected` before it is written anywhere.
pub fn check_bytes(bytes: &[u8], expected: &str, source_name: &str) -> CacheResult<()> {
    let actual = sha1_hex(bytes);
    if hash_matches(&actual, expected) {
        Ok(())
    } else {
        Err(CacheError::VerificationFailed {
            source_name: source_name.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Whether `path` exists and its content hashes to `expected`.
///
/// Never fails: unreadable files count as unverified.
pub async fn verify_file(path: &Path, expected: &str) -> bool {
    if !path.is_file() {
        return false;
    }

    match tokio::fs::read(path).await {
        Ok(bytes) => hash_matches(&sha1_hex(&bytes), expected),
        Err(e) => {
            warn!("Cannot read {:?} for verification: {}", path, e);
            false
        }
    }
}

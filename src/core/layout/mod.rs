// ─── Artifact Path Layout ───
// Deterministic on-disk locations for cached artifacts and for the
// read-only local game installation.

mod cache;
mod local;

pub use cache::CacheLayout;
pub use local::LocalInstallation;

use std::path::{Path, PathBuf};

use crate::core::error::{CacheError, CacheResult};

const SHA1_HEX_LEN: usize = 40;

/// Object names are SHA-1 hex digests; anything else never reaches a path
/// or a URL.
pub fn is_object_hash(hash: &str) -> bool {
    hash.len() == SHA1_HEX_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Two-character shard directory for a content-addressed object.
pub fn object_shard(hash: &str) -> CacheResult<&str> {
    if !is_object_hash(hash) {
        return Err(CacheError::InvalidAssetHash(hash.to_string()));
    }
    Ok(&hash[..2])
}

/// Create `path` (and missing parents) if it does not exist yet.
fn ensure_dir(path: PathBuf) -> CacheResult<PathBuf> {
    if !path.is_dir() {
        std::fs::create_dir_all(&path).map_err(|e| CacheError::io(&path, e))?;
    }
    Ok(path)
}

/// Create an empty placeholder at `path` if nothing is there yet.
fn ensure_placeholder(path: PathBuf) -> CacheResult<PathBuf> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(_) => Ok(path),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(path),
        Err(e) => Err(CacheError::io(&path, e)),
    }
}

fn object_path(objects_dir: &Path, hash: &str) -> CacheResult<PathBuf> {
    Ok(objects_dir.join(object_shard(hash)?).join(hash))
}

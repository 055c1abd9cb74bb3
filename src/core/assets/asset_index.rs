use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{CacheError, CacheResult};
use crate::core::layout::object_shard;

/// Top-level asset index JSON structure.
#[derive(Debug, Deserialize)]
pub struct AssetIndex {
    pub objects: HashMap<String, AssetObject>,
}

#[derive(Debug, Deserialize)]
pub struct AssetObject {
    pub hash: String,
    pub size: u64,
}

impl AssetIndex {
    pub fn parse(raw: &str) -> CacheResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn read(path: &Path) -> CacheResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CacheError::io(path, e))?;
        Self::parse(&raw)
    }

    /// Distinct object hashes in stable order. Many names share one object.
    pub fn unique_hashes(&self) -> BTreeSet<&str> {
        self.objects.values().map(|o| o.hash.as_str()).collect()
    }
}

/// `<base>/<2>/<hash>` in the content-addressed object store.
pub fn object_url(resources_url: &str, hash: &str) -> CacheResult<String> {
    let base = resources_url.trim_end_matches('/');
    Ok(format!("{}/{}/{}", base, object_shard(hash)?, hash))
}

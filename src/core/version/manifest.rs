// ─── Version Manifest ───
// Fetches the top-level version manifest and locates per-version metadata URLs.

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::downloader::Downloader;
use crate::core::error::{CacheError, CacheResult};

pub const VERSION_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Top-level version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub versions: Vec<VersionEntry>,
}

/// A single entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    pub url: String,
}

impl VersionManifest {
    /// Fetch and parse the manifest at `manifest_url`.
    pub async fn fetch(downloader: &Downloader, manifest_url: &str) -> CacheResult<Self> {
        info!("Fetching version manifest from {}", manifest_url);

        let raw = downloader.fetch_text(manifest_url).await?;
        let manifest: VersionManifest = serde_json::from_str(&raw)?;

        debug!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Find the first entry whose id equals `id` (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}

/// Resolve the metadata document URL for `version` from the manifest at
/// `manifest_url`. A missing version is a hard failure; callers must not retry.
pub async fn resolve_metadata_url(
    downloader: &Downloader,
    manifest_url: &str,
    version: &str,
) -> CacheResult<String> {
    let manifest = VersionManifest::fetch(downloader, manifest_url).await?;

    manifest
        .find_version(version)
        .map(|entry| entry.url.clone())
        .ok_or_else(|| CacheError::VersionNotFound {
            version: version.to_string(),
            manifest_url: manifest_url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(json: &str) -> VersionManifest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserialize_manifest_entry_ignores_extra_fields() {
        let json = r#"{
            "id": "1.20.4",
            "type": "release",
            "releaseTime": "2023-12-07T08:00:00+00:00",
            "url": "https://example.com/1.20.4.json",
            "sha1": "abc123"
        }"#;
        let entry: VersionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "1.20.4");
        assert_eq!(entry.url, "https://example.com/1.20.4.json");
    }

    #[test]
    fn find_version_matches_regardless_of_position() {
        let m = manifest(
            r#"{"versions":[
                {"id":"1.21","url":"A"},
                {"id":"1.20","url":"B"},
                {"id":"1.19","url":"C"}
            ]}"#,
        );
        assert_eq!(m.find_version("1.20").map(|e| e.url.as_str()), Some("B"));
        assert_eq!(m.find_version("1.19").map(|e| e.url.as_str()), Some("C"));
        assert!(m.find_version("1.18").is_none());
    }

    #[test]
    fn find_version_is_exact() {
        let m = manifest(r#"{"versions":[{"id":"1.20.1","url":"A"}]}"#);
        assert!(m.find_version("1.20").is_none());
    }

    #[test]
    fn empty_manifest_finds_nothing() {
        let m = manifest(r#"{"versions":[]}"#);
        assert!(m.find_version("1.20").is_none());
    }
}

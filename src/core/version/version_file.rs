// ─── Version Metadata ───
// Parses a single version document and exposes narrow views over it.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::downloader::Downloader;
use crate::core::error::{CacheError, CacheResult};

use super::manifest::resolve_metadata_url;

/// A parsed version metadata document.
///
/// Every field is optional at parse time; the accessors report a
/// [`CacheError::MissingField`] when a view is requested that the document
/// does not carry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub downloads: Option<VersionDownloads>,
    #[serde(default)]
    pub libraries: Option<Vec<LibraryEntry>>,
    #[serde(default)]
    pub asset_index: Option<AssetIndexInfo>,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    #[serde(default)]
    pub client: Option<DownloadArtifact>,
    #[serde(default)]
    pub server: Option<DownloadArtifact>,
    #[serde(default)]
    pub client_mappings: Option<DownloadArtifact>,
    #[serde(default)]
    pub server_mappings: Option<DownloadArtifact>,
}

/// A downloadable file and its published SHA-1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadArtifact {
    pub url: String,
    pub sha1: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndexInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
    pub sha1: String,
}

impl AssetIndexInfo {
    pub fn as_artifact(&self) -> DownloadArtifact {
        DownloadArtifact {
            url: self.url.clone(),
            sha1: self.sha1.clone(),
            size: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
    /// Present on legacy native-only entries.
    #[serde(default)]
    pub natives: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<DownloadArtifact>,
    #[serde(default)]
    pub classifiers: Option<HashMap<String, DownloadArtifact>>,
}

impl LibraryEntry {
    pub fn has_natives(&self) -> bool {
        self.natives.is_some()
    }

    fn classifiers(&self) -> Option<&HashMap<String, DownloadArtifact>> {
        self.downloads.as_ref()?.classifiers.as_ref()
    }
}

/// Which half of the game an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSide {
    Client,
    Server,
}

impl GameSide {
    pub fn as_str(self) -> &'static str {
        match self {
            GameSide::Client => "client",
            GameSide::Server => "server",
        }
    }
}

impl std::fmt::Display for GameSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier name of the native jars for the running OS.
pub fn current_native_classifier() -> &'static str {
    if cfg!(target_os = "windows") {
        "natives-windows"
    } else if cfg!(target_os = "macos") {
        "natives-macos"
    } else {
        "natives-linux"
    }
}

impl VersionMetadata {
    /// Fetch and parse the version document at `url`.
    pub async fn fetch(downloader: &Downloader, url: &str) -> CacheResult<Self> {
        let raw = downloader.fetch_text(url).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve `version` through the manifest, then fetch its document.
    pub async fn resolve(
        downloader: &Downloader,
        manifest_url: &str,
        version: &str,
    ) -> CacheResult<Self> {
        let url = resolve_metadata_url(downloader, manifest_url, version).await?;
        debug!("Version {} metadata at {}", version, url);

        let metadata = Self::fetch(downloader, &url).await?;
        info!("Loaded metadata for {}", version);
        Ok(metadata)
    }

    fn downloads(&self) -> CacheResult<&VersionDownloads> {
        self.downloads
            .as_ref()
            .ok_or(CacheError::MissingField("downloads"))
    }

    pub fn client_download(&self) -> CacheResult<&DownloadArtifact> {
        self.downloads()?
            .client
            .as_ref()
            .ok_or(CacheError::MissingField("downloads.client"))
    }

    pub fn server_download(&self) -> CacheResult<&DownloadArtifact> {
        self.downloads()?
            .server
            .as_ref()
            .ok_or(CacheError::MissingField("downloads.server"))
    }

    pub fn client_mappings(&self) -> CacheResult<&DownloadArtifact> {
        self.downloads()?
            .client_mappings
            .as_ref()
            .ok_or(CacheError::MissingField("downloads.client_mappings"))
    }

    pub fn server_mappings(&self) -> CacheResult<&DownloadArtifact> {
        self.downloads()?
            .server_mappings
            .as_ref()
            .ok_or(CacheError::MissingField("downloads.server_mappings"))
    }

    pub fn game_download(&self, side: GameSide) -> CacheResult<&DownloadArtifact> {
        match side {
            GameSide::Client => self.client_download(),
            GameSide::Server => self.server_download(),
        }
    }

    pub fn mappings(&self, side: GameSide) -> CacheResult<&DownloadArtifact> {
        match side {
            GameSide::Client => self.client_mappings(),
            GameSide::Server => self.server_mappings(),
        }
    }

    pub fn asset_index(&self) -> CacheResult<&AssetIndexInfo> {
        self.asset_index
            .as_ref()
            .ok_or(CacheError::MissingField("assetIndex"))
    }

    fn library_entries(&self) -> CacheResult<&[LibraryEntry]> {
        self.libraries
            .as_deref()
            .ok_or(CacheError::MissingField("libraries"))
    }

    /// Library coordinates (`group:artifact:version[:classifier]`) excluding
    /// native-only entries.
    ///
    /// Entries are keyed by `group:artifact` (everything before the last
    /// colon). A later entry with the same key replaces the stored suffix but
    /// keeps the position of the first occurrence.
    pub fn libraries(&self) -> CacheResult<Vec<String>> {
        let mut order: Vec<(&str, &str)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for lib in self.library_entries()? {
            if lib.has_natives() {
                continue;
            }

            let split = lib
                .name
                .rfind(':')
                .ok_or_else(|| CacheError::InvalidLibraryName(lib.name.clone()))?;
            let (coordinate, suffix) = lib.name.split_at(split);

            match index.get(coordinate) {
                Some(&pos) => order[pos].1 = suffix,
                None => {
                    index.insert(coordinate, order.len());
                    order.push((coordinate, suffix));
                }
            }
        }

        Ok(order
            .into_iter()
            .map(|(coordinate, suffix)| format!("{coordinate}{suffix}"))
            .collect())
    }

    /// Native downloads for `classifier`, one per library that carries it.
    pub fn native_artifacts_for(&self, classifier: &str) -> CacheResult<Vec<&DownloadArtifact>> {
        Ok(self
            .library_entries()?
            .iter()
            .filter_map(|lib| lib.classifiers()?.get(classifier))
            .collect())
    }

    /// Native downloads for the running OS.
    pub fn native_artifacts(&self) -> CacheResult<Vec<&DownloadArtifact>> {
        self.native_artifacts_for(current_native_classifier())
    }

    /// Native download URLs for the running OS.
    pub fn natives(&self) -> CacheResult<Vec<String>> {
        Ok(self
            .native_artifacts()?
            .into_iter()
            .map(|a| a.url.clone())
            .collect())
    }
}

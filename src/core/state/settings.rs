use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{CacheError, CacheResult};
use crate::core::layout::{CacheLayout, LocalInstallation};
use crate::core::version::VERSION_MANIFEST_URL;

const APP_DIR_NAME: &str = "mc-artifacts";
const SETTINGS_FILE: &str = "settings.json";

pub const RESOURCES_URL: &str = "https://resources.download.minecraft.net";

/// User configuration for one cache. Every field has a default so partial
/// settings files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Target game version id, e.g. `1.20.4`.
    pub version: String,
    pub manifest_url: String,
    pub cache_dir: PathBuf,
    /// Overrides the detected local game installation.
    pub minecraft_dir: Option<PathBuf>,
    /// Base URL of the content-addressed asset object store.
    pub resources_url: String,
    pub download_server: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            version: String::new(),
            manifest_url: VERSION_MANIFEST_URL.to_string(),
            cache_dir: default_cache_dir(),
            minecraft_dir: None,
            resources_url: RESOURCES_URL.to_string(),
            download_server: false,
        }
    }
}

impl CacheSettings {
    /// Load settings from `path`, or from the default location when `path`
    /// is `None`. An explicit path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> CacheResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_settings_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> CacheResult<Self> {
        debug!("Reading settings from {:?}", path);
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CacheError::Config(format!("settings file {} does not exist", path.display()))
            }
            _ => CacheError::io(path, e),
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            CacheError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    pub fn to_json_pretty(&self) -> CacheResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that cannot resolve anything.
    pub fn validate(&self) -> CacheResult<()> {
        if self.version.trim().is_empty() {
            return Err(CacheError::Config("no game version configured".into()));
        }
        if self.manifest_url.trim().is_empty() {
            return Err(CacheError::Config("no manifest URL configured".into()));
        }
        Ok(())
    }

    pub fn layout(&self) -> CacheLayout {
        CacheLayout::new(&self.cache_dir, &self.version)
    }

    pub fn local_installation(&self) -> Option<LocalInstallation> {
        match &self.minecraft_dir {
            Some(dir) => Some(LocalInstallation::new(dir)),
            None => LocalInstallation::detect(),
        }
    }
}

pub fn default_settings_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

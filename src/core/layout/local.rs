use std::path::{Path, PathBuf};

use crate::core::error::CacheResult;

use super::object_path;

/// An existing game installation, only ever read from.
#[derive(Debug, Clone)]
pub struct LocalInstallation {
    root: PathBuf,
}

impl LocalInstallation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The platform's default installation directory, if a home directory
    /// can be determined.
    ///
    /// - Windows: `%APPDATA%\.minecraft`
    /// - macOS: `~/Library/Application Support/minecraft`
    /// - elsewhere: `~/.minecraft`
    pub fn detect() -> Option<Self> {
        let root = if cfg!(target_os = "windows") {
            dirs::data_dir()?.join(".minecraft")
        } else if cfg!(target_os = "macos") {
            dirs::data_dir()?.join("minecraft")
        } else {
            dirs::home_dir()?.join(".minecraft")
        };
        Some(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `versions/<v>/<v>.jar` as written by the official launcher.
    pub fn version_jar(&self, version: &str) -> PathBuf {
        self.root
            .join("versions")
            .join(version)
            .join(format!("{}.jar", version))
    }

    /// Asset indexes are stored by index id, not by game version.
    pub fn index_file(&self, index_id: &str) -> PathBuf {
        self.root
            .join("assets")
            .join("indexes")
            .join(format!("{}.json", index_id))
    }

    pub fn object_dir(&self) -> PathBuf {
        self.root.join("assets").join("objects")
    }

    /// Shared object store entry. Never creates directories.
    pub fn object_file(&self, hash: &str) -> CacheResult<PathBuf> {
        object_path(&self.object_dir(), hash)
    }
}

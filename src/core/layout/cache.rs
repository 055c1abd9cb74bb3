use std::path::{Path, PathBuf};

use crate::core::error::CacheResult;
use crate::core::version::GameSide;

use super::{ensure_dir, ensure_placeholder, object_path};

/// Paths under the cache root for one game version.
///
/// ```text
/// <root>/game/<v>/<v>-client.jar            (+ server, clean and source variants)
/// <root>/game/<v>/<v>-native/{jars,natives}/
/// <root>/mapping/<v>-{client,server}.txt
/// <root>/assets/indexes/<v>.json
/// <root>/assets/objects/<2>/<hash>
/// <root>/assets/skins/
/// ```
///
/// Directory accessors create the directory when missing. Jar accessors are
/// pure; their parents are created when the jar is written.
#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
    version: String,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    // ── Game jars ───────────────────────────────────────

    pub fn game_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.root.join("game"))
    }

    fn version_path(&self) -> PathBuf {
        self.root.join("game").join(&self.version)
    }

    fn version_jar(&self, variant: &str) -> PathBuf {
        self.version_path().join(format!("{}-{}.jar", self.version, variant))
    }

    pub fn client_jar(&self) -> PathBuf {
        self.version_jar("client")
    }

    pub fn server_jar(&self) -> PathBuf {
        self.version_jar("server")
    }

    pub fn game_jar(&self, side: GameSide) -> PathBuf {
        self.version_jar(side.as_str())
    }

    pub fn client_clean_jar(&self) -> PathBuf {
        self.version_jar("client-clean")
    }

    pub fn server_clean_jar(&self) -> PathBuf {
        self.version_jar("server-clean")
    }

    pub fn client_clean_source_jar(&self) -> PathBuf {
        self.version_jar("client-clean-source")
    }

    pub fn client_server_source_jar(&self) -> PathBuf {
        self.version_jar("client-server-source")
    }

    // ── Natives ─────────────────────────────────────────

    pub fn native_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.version_path().join(format!("{}-native", self.version)))
    }

    /// Downloaded native jars.
    pub fn native_jar_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.native_dir()?.join("jars"))
    }

    /// Shared libraries extracted from the native jars.
    pub fn native_file_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.native_dir()?.join("natives"))
    }

    // ── Mappings ────────────────────────────────────────

    pub fn mapping_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.root.join("mapping"))
    }

    pub fn mapping_file(&self, side: GameSide) -> CacheResult<PathBuf> {
        ensure_placeholder(
            self.mapping_dir()?
                .join(format!("{}-{}.txt", self.version, side)),
        )
    }

    pub fn client_mapping_file(&self) -> CacheResult<PathBuf> {
        self.mapping_file(GameSide::Client)
    }

    pub fn server_mapping_file(&self) -> CacheResult<PathBuf> {
        self.mapping_file(GameSide::Server)
    }

    // ── Assets ──────────────────────────────────────────

    pub fn asset_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.root.join("assets"))
    }

    pub fn index_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.asset_dir()?.join("indexes"))
    }

    pub fn index_file(&self) -> CacheResult<PathBuf> {
        ensure_placeholder(self.index_dir()?.join(format!("{}.json", self.version)))
    }

    pub fn object_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.asset_dir()?.join("objects"))
    }

    /// `objects/<2>/<hash>`, creating the shard directory.
    pub fn object_file(&self, hash: &str) -> CacheResult<PathBuf> {
        let path = object_path(&self.object_dir()?, hash)?;
        if let Some(shard) = path.parent() {
            ensure_dir(shard.to_path_buf())?;
        }
        Ok(path)
    }

    pub fn skin_dir(&self) -> CacheResult<PathBuf> {
        ensure_dir(self.asset_dir()?.join("skins"))
    }
}

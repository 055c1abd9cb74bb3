use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the artifact cache.
/// Every module returns `Result<T, CacheError>`.
#[derive(Debug, Error)]
pub enum CacheError {
    // ── Resolution ──────────────────────────────────────
    #[error("Minecraft version {version} not found in manifest {manifest_url}")]
    VersionNotFound {
        version: String,
        manifest_url: String,
    },

    #[error("Version metadata is missing `{0}`")]
    MissingField(&'static str),

    #[error("Invalid library name: {0}")]
    InvalidLibraryName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // ── Integrity ───────────────────────────────────────
    #[error("Invalid asset object hash: {0:?}")]
    InvalidAssetHash(String),

    #[error("SHA-1 mismatch for {source_name}: expected {expected}, got {actual}")]
    VerificationFailed {
        source_name: String,
        expected: String,
        actual: String,
    },

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Archive ─────────────────────────────────────────
    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenience alias used throughout the crate.
pub type CacheResult<T> = Result<T, CacheError>;

impl CacheError {
    /// Wrap an `std::io::Error` with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }

    /// Configuration or metadata problems that retrying cannot fix.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            CacheError::VersionNotFound { .. }
                | CacheError::MissingField(_)
                | CacheError::InvalidLibraryName(_)
                | CacheError::Config(_)
        )
    }
}

impl From<std::io::Error> for CacheError {
    fn from(source: std::io::Error) -> Self {
        CacheError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_failures_are_classified() {
        let not_found = CacheError::VersionNotFound {
            version: "1.20".into(),
            manifest_url: "http://localhost/manifest.json".into(),
        };
        assert!(not_found.is_resolution_failure());
        assert!(CacheError::MissingField("downloads.client").is_resolution_failure());

        let io = CacheError::io("/tmp/x", std::io::Error::other("boom"));
        assert!(!io.is_resolution_failure());

        let mismatch = CacheError::VerificationFailed {
            source_name: "client.jar".into(),
            expected: "a".into(),
            actual: "b".into(),
        };
        assert!(!mismatch.is_resolution_failure());

        // One bad object in an index is an artifact failure, not a bad config.
        assert!(!CacheError::InvalidAssetHash("0".into()).is_resolution_failure());
    }

    #[test]
    fn messages_name_the_missing_field() {
        let err = CacheError::MissingField("assetIndex");
        assert_eq!(err.to_string(), "Version metadata is missing `assetIndex`");
    }
}

// ─── Artifact Fetch ───
// The per-artifact state machine shared by every task:
// cached → local installation copy → network.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::downloader::{copy_atomic, verify_file, write_atomic, Downloader};
use crate::core::error::{CacheError, CacheResult};

/// How an artifact ended up (or failed to end up) at its cache path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// The cache file already verified; nothing was read from the network.
    Cached,
    /// Copied from the local game installation.
    CopiedFromLocal,
    Downloaded,
    /// An I/O or verification problem; the cache file is missing or stale.
    Failed(String),
}

impl ArtifactOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ArtifactOutcome::Failed(_))
    }
}

/// One artifact to place at `target`.
#[derive(Debug, Clone)]
pub struct ArtifactRequest<'a> {
    pub label: &'a str,
    pub target: &'a Path,
    pub url: &'a str,
    pub sha1: &'a str,
    /// A possibly reusable copy in the local game installation.
    pub local_candidate: Option<&'a Path>,
}

/// Make `request.target` hold bytes hashing to `request.sha1`.
///
/// Never returns an error: failures are logged and reported as
/// [`ArtifactOutcome::Failed`]. A failed artifact is missing or stale, never
/// replaced by unverified bytes.
pub async fn ensure_artifact(
    downloader: &Downloader,
    request: ArtifactRequest<'_>,
) -> ArtifactOutcome {
    let ArtifactRequest {
        label,
        target,
        url,
        sha1,
        local_candidate,
    } = request;

    if verify_file(target, sha1).await {
        debug!("{} already cached at {:?}", label, target);
        return ArtifactOutcome::Cached;
    }

    if let Some(candidate) = local_candidate {
        if verify_file(candidate, sha1).await {
            info!("Copy local {} from {:?}", label, candidate);
            match adopt_local_copy(copy_atomic(candidate, target), target, sha1).await {
                LocalCopy::Verified => return ArtifactOutcome::CopiedFromLocal,
                LocalCopy::Failed(e) => {
                    warn!("Failed to copy {}: {}", label, e);
                    return ArtifactOutcome::Failed(e.to_string());
                }
                LocalCopy::Mismatch => {
                    warn!("Copied {} does not verify, downloading instead", label)
                }
            }
        }
    }

    info!("Download {}", label);
    let result = match downloader.fetch_verified(url, sha1).await {
        Ok(bytes) => write_atomic(target, &bytes).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ArtifactOutcome::Downloaded,
        Err(e) => {
            warn!("Failed to fetch {} from {}: {}", label, url, e);
            ArtifactOutcome::Failed(e.to_string())
        }
    }
}

#[derive(Debug)]
enum LocalCopy {
    Verified,
    /// The copy was removed again.
    Mismatch,
    Failed(CacheError),
}

/// Run `copy` into `target` and re-verify the result. A copy that does not
/// hash to `sha1` is deleted so the target is absent rather than wrong.
async fn adopt_local_copy<F>(copy: F, target: &Path, sha1: &str) -> LocalCopy
where
    F: Future<Output = CacheResult<()>>,
{
    if let Err(e) = copy.await {
        return LocalCopy::Failed(e);
    }
    if verify_file(target, sha1).await {
        return LocalCopy::Verified;
    }
    if let Err(e) = tokio::fs::remove_file(target).await {
        debug!("Cannot remove unverified copy {:?}: {}", target, e);
    }
    LocalCopy::Mismatch
}

#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub label: String,
    pub path: Option<PathBuf>,
    pub outcome: ArtifactOutcome,
}

/// Per-artifact results of one task run.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: &'static str,
    pub artifacts: Vec<ArtifactReport>,
}

impl TaskReport {
    pub fn new(task: &'static str) -> Self {
        Self {
            task,
            artifacts: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, path: &Path, outcome: ArtifactOutcome) {
        self.artifacts.push(ArtifactReport {
            label: label.into(),
            path: Some(path.to_path_buf()),
            outcome,
        });
    }

    /// Keep resolution failures fatal; log and record everything else.
    ///
    /// Returns `Ok(None)` when the error was recorded and the caller should
    /// skip this artifact.
    pub fn recover<T>(&mut self, label: &str, result: CacheResult<T>) -> CacheResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_resolution_failure() => Err(e),
            Err(e) => {
                warn!("{}: {}", label, e);
                self.artifacts.push(ArtifactReport {
                    label: label.to_string(),
                    path: None,
                    outcome: ArtifactOutcome::Failed(e.to_string()),
                });
                Ok(None)
            }
        }
    }

    pub fn count(&self, outcome: &ArtifactOutcome) -> usize {
        self.artifacts
            .iter()
            .filter(|a| std::mem::discriminant(&a.outcome) == std::mem::discriminant(outcome))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|a| a.outcome.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} cached, {} copied, {} downloaded, {} failed",
            self.task,
            self.count(&ArtifactOutcome::Cached),
            self.count(&ArtifactOutcome::CopiedFromLocal),
            self.count(&ArtifactOutcome::Downloaded),
            self.count(&ArtifactOutcome::Failed(String::new())),
        )
    }
}

use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{CacheError, CacheResult};
use crate::core::http::build_http_client;

use super::integrity::check_bytes;

/// Sequential HTTP fetcher shared by every task of one invocation.
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> CacheResult<Self> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> CacheResult<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// GET `url` as text.
    pub async fn fetch_text(&self, url: &str) -> CacheResult<String> {
        debug!("GET {}", url);
        Ok(self.get(url).await?.text().await?)
    }

    /// GET `url` as raw bytes.
    pub async fn fetch_bytes(&self, url: &str) -> CacheResult<Vec<u8>> {
        debug!("GET {}", url);
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }

    /// GET `url` and check the body against `sha1` in memory.
    pub async fn fetch_verified(&self, url: &str, sha1: &str) -> CacheResult<Vec<u8>> {
        let bytes = self.fetch_bytes(url).await?;
        check_bytes(&bytes, sha1, url)?;
        Ok(bytes)
    }
}

/// Sibling temporary path used while `dest` is being written.
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

async fn ensure_parent(dest: &Path) -> CacheResult<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CacheError::io(parent, e))?;
    }
    Ok(())
}

/// Drop a `.part` file after a failed write, copy or rename.
async fn discard(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            debug!("Cannot remove {:?}: {}", part, e);
        }
    }
}

async fn commit(part: &Path, dest: &Path) -> CacheResult<()> {
    tokio::fs::rename(part, dest)
        .await
        .map_err(|e| CacheError::io(dest, e))
}

async fn write_part(part: &Path, bytes: &[u8]) -> CacheResult<()> {
    let mut file = tokio::fs::File::create(part)
        .await
        .map_err(|e| CacheError::io(part, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| CacheError::io(part, e))?;
    // The handle is dropped on return, before the rename (required on Windows).
    file.flush().await.map_err(|e| CacheError::io(part, e))
}

/// Write `bytes` to `dest` through a `.part` file so `dest` is never left
/// half-written. No `.part` file survives a failure.
pub async fn write_atomic(dest: &Path, bytes: &[u8]) -> CacheResult<()> {
    ensure_parent(dest).await?;
    let part = part_path(dest);

    let result = match write_part(&part, bytes).await {
        Ok(()) => commit(&part, dest).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        discard(&part).await;
    }
    result
}

/// Copy `src` to `dest` through a `.part` file.
pub async fn copy_atomic(src: &Path, dest: &Path) -> CacheResult<()> {
    ensure_parent(dest).await?;
    let part = part_path(dest);

    let result = match tokio::fs::copy(src, &part).await {
        Ok(_) => commit(&part, dest).await,
        Err(e) => Err(CacheError::io(src, e)),
    };
    if result.is_err() {
        discard(&part).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_keeps_extension() {
        assert_eq!(
            part_path(Path::new("/cache/game/1.20/1.20-client.jar")),
            PathBuf::from("/cache/game/1.20/1.20-client.jar.part")
        );
    }

    #[tokio::test]
    async fn write_atomic_creates_parents_and_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a").join("b").join("file.jar");

        write_atomic(&dest, b"payload").await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn write_atomic_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("file.txt");
        std::fs::write(&dest, b"").unwrap();

        write_atomic(&dest, b"new").await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[tokio::test]
    async fn copy_atomic_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.jar");
        let dest = dir.path().join("out").join("dest.jar");
        std::fs::write(&src, b"jar bytes").unwrap();

        copy_atomic(&src, &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"jar bytes");
    }

    #[tokio::test]
    async fn copy_atomic_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_atomic(&dir.path().join("absent"), &dir.path().join("dest"))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
        assert!(!dir.path().join("dest").exists());
        assert!(!part_path(&dir.path().join("dest")).exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at `dest` makes the final rename fail.
        let dest = dir.path().join("file.jar");
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("keep"), b"x").unwrap();

        assert!(write_atomic(&dest, b"payload").await.is_err());
        assert!(!part_path(&dest).exists());

        let src = dir.path().join("src.jar");
        std::fs::write(&src, b"jar").unwrap();
        assert!(copy_atomic(&src, &dest).await.is_err());
        assert!(!part_path(&dest).exists());
    }

    #[tokio::test]
    async fn failed_copy_removes_partial_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest.jar");
        // Leftover from an interrupted run; a failed copy must not keep it.
        std::fs::write(part_path(&dest), b"half").unwrap();

        let err = copy_atomic(&dir.path().join("absent.jar"), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::Io { .. }));
        assert!(!part_path(&dest).exists());
        assert!(!dest.exists());
    }
}

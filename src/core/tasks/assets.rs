use async_trait::async_trait;
use tracing::info;

use crate::core::assets::{object_url, AssetIndex};
use crate::core::error::CacheResult;

use super::context::TaskContext;
use super::fetch::{ensure_artifact, ArtifactRequest, TaskReport};
use super::task::CacheTask;

/// Places the version's asset index and every object it references.
///
/// Objects are reused from the local installation's shared object store
/// when they verify there.
pub struct AssetsTask;

#[async_trait]
impl CacheTask for AssetsTask {
    fn name(&self) -> &'static str {
        "download-assets"
    }

    async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport> {
        let mut report = TaskReport::new(self.name());
        let index_info = ctx.metadata.asset_index()?;

        // 1. Asset index
        let Some(index_path) = report.recover("asset-index", ctx.layout.index_file())? else {
            return Ok(report);
        };
        let local_index = match (ctx.local, index_info.id.as_deref()) {
            (Some(local), Some(id)) => Some(local.index_file(id)),
            _ => None,
        };

        let outcome = ensure_artifact(
            ctx.downloader,
            ArtifactRequest {
                label: "asset-index",
                target: &index_path,
                url: &index_info.url,
                sha1: &index_info.sha1,
                local_candidate: local_index.as_deref(),
            },
        )
        .await;
        let index_failed = outcome.is_failed();
        report.push("asset-index", &index_path, outcome);
        if index_failed {
            return Ok(report);
        }

        // 2. Objects
        let Some(index) = report.recover("asset-index", AssetIndex::read(&index_path).await)? else {
            return Ok(report);
        };
        let hashes = index.unique_hashes();
        info!(
            "Asset index lists {} objects ({} distinct)",
            index.objects.len(),
            hashes.len()
        );

        for hash in hashes {
            // A malformed hash is recorded and skipped before any path is built.
            let Some(url) = report.recover(hash, object_url(&ctx.settings.resources_url, hash))?
            else {
                continue;
            };
            let Some(target) = report.recover(hash, ctx.layout.object_file(hash))? else {
                continue;
            };
            let local_object = ctx.local.and_then(|local| local.object_file(hash).ok());

            let outcome = ensure_artifact(
                ctx.downloader,
                ArtifactRequest {
                    label: hash,
                    target: &target,
                    url: &url,
                    sha1: hash,
                    local_candidate: local_object.as_deref(),
                },
            )
            .await;
            report.push(hash, &target, outcome);
        }

        // 3. Skins are written at run time by the game.
        report.recover("skins", ctx.layout.skin_dir())?;

        info!("{}", report.summary());
        Ok(report)
    }
}

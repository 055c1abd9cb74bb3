use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::CacheResult;
use crate::core::state::CacheSettings;
use crate::core::version::VersionMetadata;

use super::context::TaskContext;
use super::fetch::TaskReport;
use super::task::Task;

/// Validate `settings` and resolve the version metadata once.
pub async fn resolve_metadata(
    settings: &CacheSettings,
    downloader: &Downloader,
) -> CacheResult<VersionMetadata> {
    settings.validate()?;
    VersionMetadata::resolve(downloader, &settings.manifest_url, &settings.version).await
}

/// Run `tasks` in order against one shared metadata document.
///
/// Stops at the first resolution failure. Artifact failures are in the
/// returned reports.
pub async fn run_tasks(settings: &CacheSettings, tasks: &[Task]) -> CacheResult<Vec<TaskReport>> {
    let downloader = Downloader::new()?;
    let metadata = resolve_metadata(settings, &downloader).await?;
    let layout = settings.layout();
    let local = settings.local_installation();

    let ctx = TaskContext {
        settings,
        layout: &layout,
        local: local.as_ref(),
        downloader: &downloader,
        metadata: &metadata,
    };

    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        info!("Running {} for {}", task.name(), settings.version);
        reports.push(task.run(&ctx).await?);
    }
    Ok(reports)
}

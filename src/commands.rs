// Task entry points for the host build tool and the CLI.

use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::CacheResult;
use crate::core::state::CacheSettings;
use crate::core::tasks::{resolve_metadata, run_tasks, AssetsTask, NativesTask, Task, TaskReport};

async fn run_single(settings: &CacheSettings, task: Task) -> CacheResult<TaskReport> {
    let mut reports = run_tasks(settings, std::slice::from_ref(&task)).await?;
    Ok(reports.remove(0))
}

pub async fn download_game(settings: &CacheSettings) -> CacheResult<TaskReport> {
    run_single(settings, Task::game(settings)).await
}

pub async fn download_mappings(settings: &CacheSettings) -> CacheResult<TaskReport> {
    run_single(settings, Task::mappings(settings)).await
}

pub async fn download_assets(settings: &CacheSettings) -> CacheResult<TaskReport> {
    run_single(settings, Task::Assets(AssetsTask)).await
}

pub async fn download_natives(settings: &CacheSettings) -> CacheResult<TaskReport> {
    run_single(settings, Task::Natives(NativesTask)).await
}

pub async fn download_all(settings: &CacheSettings) -> CacheResult<Vec<TaskReport>> {
    run_tasks(settings, &Task::all(settings)).await
}

/// Library coordinates the host tool should resolve as dependencies.
pub async fn list_libraries(settings: &CacheSettings) -> CacheResult<Vec<String>> {
    let downloader = Downloader::new()?;
    let libraries = resolve_metadata(settings, &downloader).await?.libraries()?;
    info!("{} libraries for {}", libraries.len(), settings.version);
    Ok(libraries)
}

/// Native jar URLs for the running OS.
pub async fn list_natives(settings: &CacheSettings) -> CacheResult<Vec<String>> {
    let downloader = Downloader::new()?;
    resolve_metadata(settings, &downloader).await?.natives()
}

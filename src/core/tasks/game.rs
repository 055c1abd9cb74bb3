use async_trait::async_trait;
use tracing::info;

use crate::core::error::CacheResult;
use crate::core::state::CacheSettings;
use crate::core::version::GameSide;

use super::context::TaskContext;
use super::fetch::{ensure_artifact, ArtifactRequest, TaskReport};
use super::task::CacheTask;

/// Sides enabled by the settings: the client always, the server on request.
pub(crate) fn enabled_sides(settings: &CacheSettings) -> Vec<GameSide> {
    let mut sides = vec![GameSide::Client];
    if settings.download_server {
        sides.push(GameSide::Server);
    }
    sides
}

/// Places `<v>-client.jar` (and optionally `<v>-server.jar`) in the cache.
///
/// The client jar may be copied from the local installation's
/// `versions/<v>/<v>.jar` when that file verifies.
pub struct GameJarTask {
    sides: Vec<GameSide>,
}

impl GameJarTask {
    pub fn new(sides: Vec<GameSide>) -> Self {
        Self { sides }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(enabled_sides(settings))
    }
}

#[async_trait]
impl CacheTask for GameJarTask {
    fn name(&self) -> &'static str {
        "download-game"
    }

    async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport> {
        let mut report = TaskReport::new(self.name());
        let version = ctx.layout.version();

        for &side in &self.sides {
            let download = ctx.metadata.game_download(side)?;
            let target = ctx.layout.game_jar(side);
            let local_jar = match side {
                GameSide::Client => ctx.local.map(|local| local.version_jar(version)),
                GameSide::Server => None,
            };
            let label = format!("{}.jar", side);

            let outcome = ensure_artifact(
                ctx.downloader,
                ArtifactRequest {
                    label: &label,
                    target: &target,
                    url: &download.url,
                    sha1: &download.sha1,
                    local_candidate: local_jar.as_deref(),
                },
            )
            .await;
            report.push(label, &target, outcome);
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

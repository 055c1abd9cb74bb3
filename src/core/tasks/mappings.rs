use async_trait::async_trait;
use tracing::info;

use crate::core::error::CacheResult;
use crate::core::state::CacheSettings;
use crate::core::version::GameSide;

use super::context::TaskContext;
use super::fetch::{ensure_artifact, ArtifactRequest, TaskReport};
use super::game::enabled_sides;
use super::task::CacheTask;

/// Places the obfuscation mapping files under `mapping/`.
pub struct MappingsTask {
    sides: Vec<GameSide>,
}

impl MappingsTask {
    pub fn new(sides: Vec<GameSide>) -> Self {
        Self { sides }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(enabled_sides(settings))
    }
}

#[async_trait]
impl CacheTask for MappingsTask {
    fn name(&self) -> &'static str {
        "download-mappings"
    }

    async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport> {
        let mut report = TaskReport::new(self.name());

        for &side in &self.sides {
            let mappings = ctx.metadata.mappings(side)?;
            let label = format!("{}-mappings", side);

            let Some(target) = report.recover(&label, ctx.layout.mapping_file(side))? else {
                continue;
            };

            let outcome = ensure_artifact(
                ctx.downloader,
                ArtifactRequest {
                    label: &label,
                    target: &target,
                    url: &mappings.url,
                    sha1: &mappings.sha1,
                    local_candidate: None,
                },
            )
            .await;
            report.push(label, &target, outcome);
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

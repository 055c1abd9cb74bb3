use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::error::{CacheError, CacheResult};
use crate::core::natives::{extract_native_jar, file_name_from_url};

use super::context::TaskContext;
use super::fetch::{ensure_artifact, ArtifactRequest, TaskReport};
use super::task::CacheTask;

/// Places the platform's native jars under `<v>-native/jars/` and unpacks
/// their shared libraries into `<v>-native/natives/`.
pub struct NativesTask;

#[async_trait]
impl CacheTask for NativesTask {
    fn name(&self) -> &'static str {
        "download-natives"
    }

    async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport> {
        let mut report = TaskReport::new(self.name());
        let natives = ctx.metadata.native_artifacts()?;

        let Some(jar_dir) = report.recover("native-jars", ctx.layout.native_jar_dir())? else {
            return Ok(report);
        };
        let Some(file_dir) = report.recover("native-files", ctx.layout.native_file_dir())? else {
            return Ok(report);
        };

        for native in natives {
            let name = file_name_from_url(&native.url)
                .ok_or(CacheError::MissingField("classifier download file name"))?;
            let target = jar_dir.join(name);

            let outcome = ensure_artifact(
                ctx.downloader,
                ArtifactRequest {
                    label: name,
                    target: &target,
                    url: &native.url,
                    sha1: &native.sha1,
                    local_candidate: None,
                },
            )
            .await;

            if !outcome.is_failed() {
                match extract_native_jar(&target, &file_dir).await {
                    Ok(files) => info!("Extracted {} files from {}", files.len(), name),
                    Err(e) => warn!("Failed to extract {}: {}", name, e),
                }
            }
            report.push(name, &target, outcome);
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

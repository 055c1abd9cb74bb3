use async_trait::async_trait;

use crate::core::error::CacheResult;
use crate::core::state::CacheSettings;

use super::{
    assets::AssetsTask, context::TaskContext, fetch::TaskReport, game::GameJarTask,
    mappings::MappingsTask, natives::NativesTask,
};

#[async_trait]
pub trait CacheTask: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolution failures are returned; artifact-level failures end up in
    /// the report.
    async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport>;
}

/// Static dispatcher over the task family.
pub enum Task {
    Game(GameJarTask),
    Mappings(MappingsTask),
    Assets(AssetsTask),
    Natives(NativesTask),
}

impl Task {
    pub fn game(settings: &CacheSettings) -> Self {
        Self::Game(GameJarTask::from_settings(settings))
    }

    pub fn mappings(settings: &CacheSettings) -> Self {
        Self::Mappings(MappingsTask::from_settings(settings))
    }

    /// Game, mappings, assets, natives, in that order.
    pub fn all(settings: &CacheSettings) -> Vec<Self> {
        vec![
            Self::game(settings),
            Self::mappings(settings),
            Self::Assets(AssetsTask),
            Self::Natives(NativesTask),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Task::Game(t) => t.name(),
            Task::Mappings(t) => t.name(),
            Task::Assets(t) => t.name(),
            Task::Natives(t) => t.name(),
        }
    }

    pub async fn run(&self, ctx: &TaskContext<'_>) -> CacheResult<TaskReport> {
        match self {
            Task::Game(t) => t.run(ctx).await,
            Task::Mappings(t) => t.run(ctx).await,
            Task::Assets(t) => t.run(ctx).await,
            Task::Natives(t) => t.run(ctx).await,
        }
    }
}

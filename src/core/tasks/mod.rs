mod assets;
mod context;
mod fetch;
mod game;
mod mappings;
mod natives;
mod runner;
mod task;

pub use assets::AssetsTask;
pub use context::TaskContext;
pub use fetch::{ensure_artifact, ArtifactOutcome, ArtifactReport, ArtifactRequest, TaskReport};
pub use game::GameJarTask;
pub use mappings::MappingsTask;
pub use natives::NativesTask;
pub use runner::{resolve_metadata, run_tasks};
pub use task::{CacheTask, Task};

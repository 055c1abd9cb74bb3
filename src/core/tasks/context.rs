use crate::core::downloader::Downloader;
use crate::core::layout::{CacheLayout, LocalInstallation};
use crate::core::state::CacheSettings;
use crate::core::version::VersionMetadata;

/// Everything a task needs, resolved once per invocation.
pub struct TaskContext<'a> {
    pub settings: &'a CacheSettings,
    pub layout: &'a CacheLayout,
    pub local: Option<&'a LocalInstallation>,
    pub downloader: &'a Downloader,
    pub metadata: &'a VersionMetadata,
}

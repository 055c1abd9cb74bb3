pub mod manifest;
pub mod version_file;

pub use manifest::{resolve_metadata_url, VersionEntry, VersionManifest, VERSION_MANIFEST_URL};
pub use version_file::{
    current_native_classifier, AssetIndexInfo, DownloadArtifact, GameSide, LibraryDownloads,
    LibraryEntry, VersionDownloads, VersionMetadata,
};

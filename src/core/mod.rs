// ─── mc-artifacts Core ───
// Fetches game artifacts into a cache directory, SHA-1 verified.
//
// Architecture:
//   core/
//     version/    - Version manifest + per-version metadata views
//     layout/     - Cache and local-installation path layout
//     downloader/ - HTTP fetch, atomic writes, SHA-1 verification
//     assets/     - Asset index model + object URLs
//     natives/    - Native jar extraction
//     tasks/      - Cached → local copy → network fetch, per artifact
//     state/      - User settings

pub mod assets;
pub mod downloader;
pub mod error;
pub mod http;
pub mod layout;
pub mod natives;
pub mod state;
pub mod tasks;
pub mod version;

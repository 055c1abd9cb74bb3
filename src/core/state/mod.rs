mod settings;

pub use settings::{default_settings_path, CacheSettings, RESOURCES_URL};

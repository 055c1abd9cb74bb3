mod asset_index;

pub use asset_index::{object_url, AssetIndex, AssetObject};

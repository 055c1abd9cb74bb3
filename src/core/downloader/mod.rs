mod client;
pub mod integrity;

pub use client::{copy_atomic, write_atomic, Downloader};
pub use integrity::{sha1_hex, verify_file};

//! Shared fixtures for the task integration tests: a mock launcher
//! backend plus throwaway cache and installation directories.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mc_artifacts::core::downloader::sha1_hex;
use mc_artifacts::CacheSettings;

pub const VERSION: &str = "1.20";

pub struct Fixture {
    pub server: MockServer,
    pub cache: TempDir,
    pub local: TempDir,
}

impl Fixture {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            cache: TempDir::new().unwrap(),
            local: TempDir::new().unwrap(),
        }
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.server.uri(), route)
    }

    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            version: VERSION.to_string(),
            manifest_url: self.url("/mc/game/version_manifest_v2.json"),
            cache_dir: self.cache.path().to_path_buf(),
            minecraft_dir: Some(self.local.path().to_path_buf()),
            resources_url: self.url("/objects"),
            download_server: false,
        }
    }

    /// Serve the manifest and `metadata` as the version document.
    pub async fn serve_version(&self, metadata: Value) {
        let manifest = json!({
            "latest": { "release": VERSION },
            "versions": [
                { "id": "1.19.4", "url": self.url("/v1/packages/1.19.4.json") },
                { "id": VERSION, "url": self.url("/v1/packages/1.20.json") },
            ]
        });
        self.serve_json("/mc/game/version_manifest_v2.json", manifest).await;
        self.serve_json("/v1/packages/1.20.json", metadata).await;
    }

    pub async fn serve_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` at `route`, expecting exactly `hits` requests.
    pub async fn serve_bytes(&self, route: &str, body: &[u8], hits: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .expect(hits)
            .mount(&self.server)
            .await;
    }

    /// A file in the fake local installation.
    pub fn write_local(&self, relative: &str, body: &[u8]) {
        write_file(&self.local.path().join(relative), body);
    }
}

/// `{url, sha1, size}` for `body` served at `url`.
pub fn artifact(url: String, body: &[u8]) -> Value {
    json!({ "url": url, "sha1": sha1_hex(body), "size": body.len() })
}

pub fn write_file(path: &Path, body: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

pub fn read_sha1(path: &Path) -> String {
    sha1_hex(&std::fs::read(path).unwrap())
}

/// A jar holding one shared library and a manifest entry.
pub fn native_jar(library: &str) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(library, options).unwrap();
        zip.write_all(b"\x7fELF native").unwrap();
        zip.start_file("META-INF/MANIFEST.MF", options).unwrap();
        zip.write_all(b"Manifest-Version: 1.0\n").unwrap();
        zip.finish().unwrap();
    }
    buf.into_inner()
}

use std::io::{Cursor, Write};
use std::path::Path;

use tracing::debug;

use crate::core::error::{CacheError, CacheResult};

const NATIVE_EXTENSIONS: [&str; 4] = [".dll", ".so", ".dylib", ".jnilib"];

/// Whether a jar entry is a top-level shared library.
pub fn is_native_entry(name: &str) -> bool {
    if name.contains("META-INF") || name.contains('/') || name.contains('\\') {
        return false;
    }
    NATIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Extract the shared libraries of `jar` into `dest_dir`, overwriting
/// earlier extractions. Returns the extracted file names.
pub async fn extract_native_jar(jar: &Path, dest_dir: &Path) -> CacheResult<Vec<String>> {
    let bytes = tokio::fs::read(jar)
        .await
        .map_err(|e| CacheError::io(jar, e))?;

    let dest = dest_dir.to_path_buf();
    tokio::task::spawn_blocking(move || extract_from_bytes(bytes, &dest))
        .await
        .map_err(|e| CacheError::io(jar, std::io::Error::other(e)))?
}

fn extract_from_bytes(bytes: Vec<u8>, dest_dir: &Path) -> CacheResult<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut extracted = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();
        if file.is_dir() || !is_native_entry(&name) {
            continue;
        }

        let dest = dest_dir.join(&name);
        let mut out = std::fs::File::create(&dest).map_err(|e| CacheError::io(&dest, e))?;
        std::io::copy(&mut file, &mut out).map_err(|e| CacheError::io(&dest, e))?;
        out.flush().map_err(|e| CacheError::io(&dest, e))?;

        debug!("Extracted native: {}", name);
        extracted.push(name);
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::write::SimpleFileOptions;

    fn native_jar(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn native_entry_filter() {
        assert!(is_native_entry("liblwjgl.so"));
        assert!(is_native_entry("lwjgl.dll"));
        assert!(is_native_entry("liblwjgl.dylib"));
        assert!(is_native_entry("libjinput-osx.jnilib"));
        assert!(!is_native_entry("META-INF/MANIFEST.MF"));
        assert!(!is_native_entry("linux/x64/org/lwjgl/liblwjgl.so"));
        assert!(!is_native_entry("org/lwjgl/Version.class"));
    }

    #[tokio::test]
    async fn extracts_only_top_level_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lwjgl-natives.jar");
        let out = dir.path().join("natives");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(
            &jar,
            native_jar(&[
                ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0"),
                ("liblwjgl.so", b"elf"),
                ("nested/libskip.so", b"elf"),
                ("lwjgl.dll", b"pe"),
            ]),
        )
        .unwrap();

        let mut names = extract_native_jar(&jar, &out).await.unwrap();
        names.sort();

        assert_eq!(names, vec!["liblwjgl.so", "lwjgl.dll"]);
        assert_eq!(std::fs::read(out.join("liblwjgl.so")).unwrap(), b"elf");
        assert!(!out.join("MANIFEST.MF").exists());
    }

    #[tokio::test]
    async fn corrupt_jar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("broken.jar");
        std::fs::write(&jar, b"not a zip").unwrap();

        let err = extract_native_jar(&jar, dir.path()).await.unwrap_err();
        assert!(matches!(err, CacheError::Zip(_)));
    }
}

mod extract;

pub use extract::{extract_native_jar, is_native_entry};

/// File name of a download URL, without query or fragment.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_from_url_strips_query() {
        let url =
            "https://libraries.minecraft.net/org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1-natives-linux.jar";
        assert_eq!(
            file_name_from_url(url),
            Some("lwjgl-3.3.1-natives-linux.jar")
        );
        assert_eq!(file_name_from_url("https://x/a.jar?sig=1"), Some("a.jar"));
        assert_eq!(file_name_from_url("https://x/dir/"), None);
    }
}

//! URL and path manipulation utilities.

use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use url::Url;

/// Trailing file extension, never crossing a path separator
static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.[^/.]+$").expect("EXTENSION_RE: hardcoded regex is valid")
});

/// Hostname of a URL, used as the document-level heading
pub fn host_of(url: &str) -> Result<String> {
    let url = Url::parse(url).map_err(|e| anyhow::anyhow!("Failed to parse URL: {e}"))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid URL: no host"))?;
    Ok(host.to_string())
}

/// Strip one trailing extension from a configured output file name
///
/// `"out/docs.json"` becomes `"out/docs"`; `"out.v2/docs"` is unchanged.
#[must_use]
pub fn strip_extension(file_name: &str) -> &str {
    match EXTENSION_RE.find(file_name) {
        Some(m) => &file_name[..m.start()],
        None => file_name,
    }
}

/// Create the parent directory of `path` if it has one
pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("output.json"), "output");
        assert_eq!(strip_extension("directory_opus.md"), "directory_opus");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("out.v2/docs"), "out.v2/docs");
        assert_eq!(strip_extension("plain"), "plain");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://www.builder.io/c/docs/developers").unwrap(),
            "www.builder.io"
        );
        assert_eq!(host_of("https://x/intro").unwrap(), "x");
        assert!(host_of("not a url").is_err());
    }
}

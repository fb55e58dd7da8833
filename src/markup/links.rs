//! Image source resolution for write-up content.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::util::{normalize_relative, url_path};

/// Resolves relative image sources to URLs under the generated site.
///
/// Write-ups reference screenshots relative to their own location
/// (`./img/shell.png`). The generator copies those files under a content
/// prefix in the output directory, so the resolver maps each relative
/// source to `<prefix><content path>`.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    prefix: String,
    document_path: PathBuf,
}

impl AssetResolver {
    /// Creates resolver for one write-up.
    ///
    /// # Arguments
    ///
    /// * `prefix`: URL prefix where content files are published (e.g. `../content/`)
    /// * `document_path`: Write-up path relative to the content root
    pub fn new(prefix: impl Into<String>, document_path: impl AsRef<Path>) -> Self {
        Self {
            prefix: prefix.into(),
            document_path: document_path.as_ref().to_path_buf(),
        }
    }

    /// Resolves image source to the URL used in the rendered page.
    ///
    /// - Absolute URLs (`http://`, `https://`) and `data:` URIs are unchanged
    /// - Site-absolute paths (`/img/a.png`) and anchors are unchanged
    /// - Relative paths resolve against the write-up's directory
    ///
    /// # Errors
    ///
    /// Returns error if a relative path climbs above the content root
    pub fn resolve(&self, src: &str) -> Result<String> {
        match self.local_path(src)? {
            Some(path) => Ok(format!("{}{}", self.prefix, url_path(&path))),
            None => Ok(src.to_string()),
        }
    }

    /// Content-root-relative path of a local image, or None for external sources.
    ///
    /// # Errors
    ///
    /// Returns error if the path escapes the content root
    pub fn local_path(&self, src: &str) -> Result<Option<PathBuf>> {
        if is_external(src) {
            return Ok(None);
        }

        let current_dir = self.document_path.parent().unwrap_or_else(|| Path::new(""));
        let target = current_dir.join(src);

        normalize_relative(&target)
            .with_context(|| format!("Image path escapes content root: {}", src))
            .map(Some)
    }
}

fn is_external(src: &str) -> bool {
    src.starts_with('/')
        || src.starts_with('#')
        || src.contains("://")
        || src.to_ascii_lowercase().starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_image() {
        // Arrange
        let resolver = AssetResolver::new("../content/", "writeups/sqli.md");

        // Act
        let result = resolver.resolve("./img/login.png").expect("Should resolve");

        // Assert
        assert_eq!(result, "../content/writeups/img/login.png");
    }

    #[test]
    fn test_resolve_parent_directory_image() {
        // Arrange
        let resolver = AssetResolver::new("../content/", "writeups/htb/sqli.md");

        // Act
        let result = resolver
            .resolve("../shared/banner.png")
            .expect("Should resolve");

        // Assert
        assert_eq!(result, "../content/writeups/shared/banner.png");
    }

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        let resolver = AssetResolver::new("../content/", "writeups/a.md");

        let result = resolver
            .resolve("https://example.com/shot.png")
            .expect("Should pass through");

        assert_eq!(result, "https://example.com/shot.png");
    }

    #[test]
    fn test_resolve_site_absolute_unchanged() {
        let resolver = AssetResolver::new("../content/", "writeups/a.md");

        let result = resolver.resolve("/img/a.png").expect("Should pass through");

        assert_eq!(result, "/img/a.png");
    }

    #[test]
    fn test_local_path_none_for_external() {
        let resolver = AssetResolver::new("", "a.md");

        assert_eq!(
            resolver
                .local_path("data:image/png;base64,AAAA")
                .expect("Should classify"),
            None
        );
    }

    #[test]
    fn test_reject_traversal() {
        // Arrange
        let resolver = AssetResolver::new("../content/", "writeups/a.md");

        // Act
        let result = resolver.resolve("../../../etc/passwd");

        // Assert
        let err = result.expect_err("Should reject path escaping content root");
        assert!(
            err.to_string().contains("escapes"),
            "Error should indicate path problem: {}",
            err
        );
    }

    #[test]
    fn test_root_level_document() {
        let resolver = AssetResolver::new("content/", "notes.md");

        let result = resolver.resolve("diagram.png").expect("Should resolve");

        assert_eq!(result, "content/diagram.png");
    }
}

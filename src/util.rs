//! Path helpers shared by the content loader and asset links.

use std::path::{Component, Path, PathBuf};

/// Normalizes a content path relative to the content root.
///
/// Leading root markers are dropped so site-absolute paths such as
/// `/writeups/a.md` address the same file as `writeups/a.md`. `.` segments
/// are skipped and `..` pops the previous segment.
///
/// # Returns
///
/// Normalized relative path, or None if the path climbs above the root
/// or names nothing
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(c) => components.push(c),
            Component::ParentDir => {
                components.pop()?;
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if components.is_empty() {
        return None;
    }

    Some(components.iter().collect())
}

/// Joins path components with forward slashes for use in URLs.
pub fn url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_slash() {
        assert_eq!(
            normalize_relative(Path::new("/writeups/a.md")),
            Some(PathBuf::from("writeups/a.md"))
        );
    }

    #[test]
    fn test_normalize_resolves_parent_inside_root() {
        assert_eq!(
            normalize_relative(Path::new("writeups/img/../a.md")),
            Some(PathBuf::from("writeups/a.md"))
        );
        assert_eq!(
            normalize_relative(Path::new("./writeups/./a.md")),
            Some(PathBuf::from("writeups/a.md"))
        );
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert_eq!(normalize_relative(Path::new("../etc/passwd")), None);
        assert_eq!(normalize_relative(Path::new("a/../../b")), None);
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert_eq!(normalize_relative(Path::new("")), None);
        assert_eq!(normalize_relative(Path::new("/")), None);
        assert_eq!(normalize_relative(Path::new("a/..")), None);
    }

    #[test]
    fn test_url_path_uses_forward_slashes() {
        let path: PathBuf = ["writeups", "img", "shot.png"].iter().collect();

        assert_eq!(url_path(&path), "writeups/img/shot.png");
    }
}

//! Path helpers shared by the walker, rules and reporters.

use std::path::{Component, Path, PathBuf};

/// Renders `path` relative to `root` for display, always starting with `.`.
///
/// Paths outside `root` are rendered unchanged.
///
/// # Example
///
/// ```ignore
/// assert_eq!(relative_display(Path::new("/a/b/c"), Path::new("/a/b")), "./c");
/// ```
#[must_use]
pub fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => Path::new(".").join(rel).display().to_string(),
        Err(_) => path.display().to_string(),
    }
}

/// Returns the name of the directory directly containing `path`.
#[must_use]
pub fn parent_name(path: &Path) -> Option<&str> {
    path.parent()?.file_name()?.to_str()
}

/// Cleans `path` lexically: drops `.` components and folds `..` into the
/// preceding component.
///
/// Symlinks are left unresolved, so every name the caller wrote survives.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Returns `path` as an absolute, lexically clean path, joined onto `base`
/// when relative.
#[must_use]
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_display() {
        let cases = [
            ("/a/b/c", "/a/b", "./c"),
            ("/a/b/c/test.txt", "/a/b", "./c/test.txt"),
            ("/a/b", "/a/b", "."),
        ];
        for (path, root, expected) in cases {
            assert_eq!(
                relative_display(Path::new(path), Path::new(root)),
                expected,
                "relative_display({path}, {root})"
            );
        }
    }

    #[test]
    fn test_relative_display_outside_root() {
        assert_eq!(
            relative_display(Path::new("/elsewhere/x.rst"), Path::new("/a/b")),
            "/elsewhere/x.rst"
        );
    }

    #[test]
    fn test_parent_name() {
        assert_eq!(parent_name(Path::new("/a/b/c")), Some("b"));
        assert_eq!(parent_name(Path::new("./a/test.txt")), Some("a"));
        assert_eq!(parent_name(Path::new("/top")), None);
    }

    #[test]
    fn test_normalize() {
        let cases = [
            ("/a/./b/c", "/a/b/c"),
            ("/a/b/../c", "/a/c"),
            ("/..", "/"),
            ("a/../..", ".."),
            ("../../a", "../../a"),
            ("./", "."),
            ("/work/archivematica-docs/.", "/work/archivematica-docs"),
        ];
        for (path, expected) in cases {
            assert_eq!(normalize(Path::new(path)), PathBuf::from(expected), "normalize({path})");
        }
    }

    #[test]
    fn test_absolutize() {
        let base = Path::new("/work");
        assert_eq!(absolutize(Path::new("docs"), base), PathBuf::from("/work/docs"));
        assert_eq!(absolutize(Path::new("../docs"), base), PathBuf::from("/docs"));
        assert_eq!(absolutize(Path::new("."), base), PathBuf::from("/work"));
        assert_eq!(absolutize(Path::new("/srv/docs/"), base), PathBuf::from("/srv/docs"));
    }
}

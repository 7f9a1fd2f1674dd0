//! Lexical path helpers for registry listings.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// Drop `.` steps and fold `dir/..` pairs, without touching the filesystem.
///
/// Leading `..` steps of a relative path are kept. `..` directly under the
/// root stays at the root.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else if !matches!(last, Some(Component::RootDir | Component::Prefix(_))) {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// `path` relative to `base` when it lies under `base`, otherwise `path`
/// itself. Both are normalized first.
pub fn relative_to(path: impl AsRef<Path>, base: impl AsRef<Path>) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);

    match path.strip_prefix(&base) {
        Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rest) => rest.to_path_buf(),
        Err(_) => path,
    }
}

/// Join components with `/` regardless of platform.
pub fn to_unix_string(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .map(|c| match c {
            Component::RootDir => Cow::Borrowed(""),
            other => other.as_os_str().to_string_lossy(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a/b/../c", "a/c" ; "folds parent")]
    #[test_case("a/./b", "a/b" ; "drops current")]
    #[test_case("../a/b", "../a/b" ; "keeps leading parent")]
    #[test_case("/a/../b", "/b" ; "absolute")]
    #[test_case("/..", "/" ; "parent of root")]
    #[test_case("a/..", "." ; "empty result")]
    fn test_normalize(input: &str, expected: &str) {
        assert_eq!(normalize(input), PathBuf::from(expected));
    }

    #[test]
    fn test_relative_to_under_base() {
        assert_eq!(relative_to("/out/pkg/setup.cfg", "/out"), PathBuf::from("pkg/setup.cfg"));
        assert_eq!(relative_to("out/./pkg/../a.txt", "out"), PathBuf::from("a.txt"));
        assert_eq!(relative_to("/out", "/out"), PathBuf::from("."));
    }

    #[test]
    fn test_relative_to_outside_base_keeps_path() {
        assert_eq!(relative_to("/etc/x", "/out"), PathBuf::from("/etc/x"));
        assert_eq!(relative_to("/out/../etc/x", "/out"), PathBuf::from("/etc/x"));
    }

    #[test]
    fn test_to_unix_string() {
        assert_eq!(to_unix_string("pkg/sub/file.txt"), "pkg/sub/file.txt");
        assert_eq!(to_unix_string(Path::new("a").join("b")), "a/b");
        assert_eq!(to_unix_string("/etc/x"), "/etc/x");
    }
}

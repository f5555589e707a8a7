//! Path filtering logic for packaging.
//!
//! Bridges filesystem paths to the string-based [`ExclusionRules`]. Every
//! included file needs a UTF-8 archive name, so a non-UTF-8 component is an
//! error from [`archive_name`] rather than something to filter.

use crate::ExclusionRules;
use crate::PackageError;
use crate::Result;
use std::path::Component;
use std::path::Path;

/// Checks if a directory should be pruned from the walk.
///
/// Only the directory's own basename is compared, so `.git` is pruned at any
/// depth while `sub/.git` as a rule string would never match.
///
/// # Examples
///
/// ```
/// use shipzip_core::ExclusionRules;
/// use shipzip_core::filters;
/// use std::path::Path;
///
/// let rules = ExclusionRules::default();
/// assert!(filters::should_prune_dir(Path::new("vendor/lib/.git"), &rules));
/// assert!(!filters::should_prune_dir(Path::new(".git/hooks"), &rules));
/// ```
#[must_use]
pub fn should_prune_dir(path: &Path, rules: &ExclusionRules) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| rules.is_ignored_dir(name))
}

/// Checks if a file should be left out of the package.
///
/// `relative` is the root-relative archive name as produced by
/// [`archive_name`]; its last segment is the file name.
///
/// # Examples
///
/// ```
/// use shipzip_core::ExclusionRules;
/// use shipzip_core::filters;
///
/// let rules = ExclusionRules::default();
/// assert!(filters::should_skip_file("README.md", &rules));
/// assert!(!filters::should_skip_file("doc/README.md", &rules));
/// ```
#[must_use]
pub fn should_skip_file(relative: &str, rules: &ExclusionRules) -> bool {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    rules.is_ignored_file(name, relative)
}

/// Computes the in-archive name of `path` relative to `root`.
///
/// Components are joined with `/` regardless of platform, as the zip format
/// requires.
///
/// # Errors
///
/// Returns an error if:
/// - `path` is not under `root`
/// - a component is not valid UTF-8
///
/// # Examples
///
/// ```
/// use shipzip_core::filters;
/// use std::path::Path;
///
/// let root = Path::new("/home/user/extension");
/// let source = Path::new("/home/user/extension/src/popup.js");
///
/// let name = filters::archive_name(source, root).unwrap();
/// assert_eq!(name, "src/popup.js");
/// ```
pub fn archive_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        PackageError::Io(std::io::Error::other(format!(
            "path {} is not under root directory {}",
            path.display(),
            root.display()
        )))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                PackageError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("path is not valid UTF-8: {}", path.display()),
                ))
            })?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_should_prune_dir_by_basename() {
        let rules = ExclusionRules::default();
        assert!(should_prune_dir(Path::new(".git"), &rules));
        assert!(should_prune_dir(Path::new("/root/pkg/.mypy_cache"), &rules));
        assert!(should_prune_dir(Path::new("a/b/c/.git"), &rules));
        assert!(!should_prune_dir(Path::new(".github"), &rules));
        assert!(!should_prune_dir(Path::new("images"), &rules));
    }

    #[test]
    fn test_should_prune_dir_ignores_full_path_rules() {
        let rules = ExclusionRules::empty().with_ignored_dirs(["build/tmp"]);
        assert!(!should_prune_dir(Path::new("build/tmp"), &rules));
    }

    #[test]
    fn test_should_skip_file_rules() {
        let rules = ExclusionRules::default();
        assert!(should_skip_file("x/.gitignore", &rules));
        assert!(should_skip_file("old.js~", &rules));
        assert!(should_skip_file("pkg.zip", &rules));
        assert!(should_skip_file("images/icon.svg", &rules));
        assert!(!should_skip_file("images/logo.svg", &rules));
        assert!(!should_skip_file("manifest.json", &rules));
        assert!(!should_skip_file("docs/Makefile", &rules));
    }

    #[test]
    fn test_archive_name_nested() {
        let root = Path::new("/work/ext");
        let name = archive_name(Path::new("/work/ext/a/b/c.txt"), root).unwrap();
        assert_eq!(name, "a/b/c.txt");
    }

    #[test]
    fn test_archive_name_root_file() {
        let root = Path::new("/work/ext");
        let name = archive_name(Path::new("/work/ext/manifest.json"), root).unwrap();
        assert_eq!(name, "manifest.json");
    }

    #[test]
    fn test_archive_name_relative_root() {
        let root = Path::new("./ext");
        let name = archive_name(Path::new("./ext/src/main.js"), root).unwrap();
        assert_eq!(name, "src/main.js");
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_name_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/work/ext");
        let path = root.join(OsStr::from_bytes(b"bad\xffname.js"));
        let err = archive_name(&path, root).unwrap_err();
        assert!(
            matches!(&err, PackageError::Io(e) if e.kind() == std::io::ErrorKind::InvalidData),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_archive_name_not_under_root() {
        let root = Path::new("/work/ext");
        assert!(archive_name(Path::new("/work/other/file.txt"), root).is_err());
    }
}

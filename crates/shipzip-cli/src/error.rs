//! Error conversion utilities for CLI.
//!
//! Converts shipzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use shipzip_core::PackageError;
use shipzip_core::manifest::MANIFEST_NAME;
use std::fmt::Write;
use std::path::Path;

/// Converts `PackageError` to user-friendly anyhow error with context
pub fn convert_package_error(err: PackageError, root: &Path) -> anyhow::Error {
    if err.is_repository_check_failure() {
        return convert_repository_check_failure(err, root);
    }
    if err.is_manifest_error() {
        return convert_manifest_error(err, root);
    }

    match err {
        PackageError::UnexpectedStatusFormat { reason } => {
            anyhow!(
                "Cannot check the git status of '{}': {reason}\n\
                 HINT: The check needs a branch that tracks an upstream; use --no-check-git otherwise.",
                root.display()
            )
        }
        PackageError::ExternalTool { command, reason } => {
            anyhow!(
                "Failed to run `{command}` in '{}': {reason}\n\
                 HINT: Make sure git is installed and the directory is a repository, or pass --no-check-git.",
                root.display()
            )
        }
        PackageError::InvalidOutputTemplate { template, reason } => {
            anyhow!(
                "Invalid output template '{template}': {reason}\n\
                 HINT: Use {{version}} for the package version and {{{{ }}}} for literal braces."
            )
        }
        other => generic_error(other, root),
    }
}

/// Dirty tree and unpushed commits share the same way out.
fn convert_repository_check_failure(err: PackageError, root: &Path) -> anyhow::Error {
    let msg = match err {
        PackageError::DirtyWorkingTree { lines } => {
            let mut msg = format!(
                "Refusing to package '{}': the working tree has uncommitted changes:",
                root.display()
            );
            for line in &lines {
                let _ = write!(msg, "\n  {line}");
            }
            msg
        }
        PackageError::UnpushedCommits { ahead } => format!(
            "Refusing to package '{}': the branch is {ahead} commit(s) ahead of its upstream",
            root.display()
        ),
        other => return generic_error(other, root),
    };

    anyhow!(
        "{msg}\n\
         HINT: Commit and push your changes first, or pass --no-check-git to skip this check."
    )
}

fn convert_manifest_error(err: PackageError, root: &Path) -> anyhow::Error {
    let msg = match err {
        PackageError::MissingManifest { path, source } => {
            format!("Cannot read manifest '{}': {source}", path.display())
        }
        PackageError::MalformedManifest { path, reason } => {
            format!("Invalid manifest '{}': {reason}", path.display())
        }
        other => return generic_error(other, root),
    };

    anyhow!(
        "{msg}\n\
         HINT: ROOT_DIRECTORY must contain a {MANIFEST_NAME} with a string \"version\" field."
    )
}

fn generic_error(err: PackageError, root: &Path) -> anyhow::Error {
    anyhow::Error::from(err).context(format!("failed to package '{}'", root.display()))
}

/// Adds context to a packaging result
pub fn add_package_context<T>(
    result: Result<T, PackageError>,
    root: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_package_error(e, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_dirty_tree_lists_lines() {
        let err = PackageError::DirtyWorkingTree {
            lines: vec!["1 .M N... popup.js".into(), "? notes.txt".into()],
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.contains("uncommitted changes"));
        assert!(msg.contains("  1 .M N... popup.js"));
        assert!(msg.contains("  ? notes.txt"));
        assert!(msg.contains("HINT"));
        assert!(msg.contains("--no-check-git"));
    }

    #[test]
    fn test_convert_unpushed() {
        let err = PackageError::UnpushedCommits { ahead: 2 };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.contains("2 commit(s) ahead"));
        assert!(msg.contains("HINT: Commit and push your changes first"));
    }

    #[test]
    fn test_convert_missing_manifest() {
        let err = PackageError::MissingManifest {
            path: PathBuf::from("ext/manifest.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.contains("ext/manifest.json"));
        assert!(msg.contains("manifest.json with a string \"version\" field"));
    }

    #[test]
    fn test_convert_malformed_manifest_shares_hint() {
        let err = PackageError::MalformedManifest {
            path: PathBuf::from("ext/manifest.json"),
            reason: "missing field `version`".into(),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.starts_with("Invalid manifest 'ext/manifest.json': missing field `version`"));
        assert!(msg.contains("HINT: ROOT_DIRECTORY must contain a manifest.json"));
    }

    #[test]
    fn test_convert_status_format_is_not_a_repository_check_failure() {
        let err = PackageError::UnexpectedStatusFormat {
            reason: "no upstream".into(),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.starts_with("Cannot check the git status of 'ext'"));
        assert!(!msg.contains("Commit and push"));
    }

    #[test]
    fn test_convert_template_hint_escapes_braces() {
        let err = PackageError::InvalidOutputTemplate {
            template: "{name}.zip".into(),
            reason: "unknown placeholder".into(),
        };
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.contains("Use {version} for the package version and {{ }} for literal braces"));
    }

    #[test]
    fn test_convert_io_error_generic() {
        let err = PackageError::Io(io::Error::other("disk full"));
        let msg = format!("{:?}", convert_package_error(err, Path::new("ext")));
        assert!(msg.contains("failed to package 'ext'"));
        assert!(msg.contains("disk full"));
    }
}

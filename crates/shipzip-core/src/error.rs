//! Error types for packaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackageError`.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Errors that can occur while packaging a source tree.
#[derive(Error, Debug)]
pub enum PackageError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest file does not exist or cannot be opened.
    #[error("cannot open manifest {path}: {source}")]
    MissingManifest {
        /// Expected manifest location.
        path: PathBuf,
        /// Underlying open error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has no string `version` field.
    #[error("malformed manifest {path}: {reason}")]
    MalformedManifest {
        /// Manifest location.
        path: PathBuf,
        /// What was wrong with the content.
        reason: String,
    },

    /// The version-control command could not be run or exited with failure.
    #[error("`{command}` failed: {reason}")]
    ExternalTool {
        /// Command line that was attempted.
        command: String,
        /// Spawn error or captured stderr.
        reason: String,
    },

    /// The status report did not have the expected shape.
    #[error("unexpected git status output: {reason}")]
    UnexpectedStatusFormat {
        /// Description of the mismatch.
        reason: String,
    },

    /// The working tree has uncommitted or untracked changes.
    #[error("working tree has {} uncommitted change(s)", lines.len())]
    DirtyWorkingTree {
        /// Raw status lines describing each change.
        lines: Vec<String>,
    },

    /// The current branch has commits that are not on its upstream.
    #[error("branch is {ahead} commit(s) ahead of its upstream")]
    UnpushedCommits {
        /// Number of local commits not yet pushed.
        ahead: u64,
    },

    /// The output path template could not be rendered.
    #[error("invalid output template '{template}': {reason}")]
    InvalidOutputTemplate {
        /// Template as supplied.
        template: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Compression level outside `1..=9`.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Root directory does not exist or is not a directory.
    #[error("source directory not found: {path}")]
    SourceNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The zip writer rejected an operation.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl PackageError {
    /// Returns `true` if this error comes from the repository cleanliness
    /// gate and can be fixed by committing or pushing.
    ///
    /// # Examples
    ///
    /// ```
    /// use shipzip_core::PackageError;
    ///
    /// let err = PackageError::UnpushedCommits { ahead: 2 };
    /// assert!(err.is_repository_check_failure());
    ///
    /// let err = PackageError::UnexpectedStatusFormat {
    ///     reason: "no upstream".into(),
    /// };
    /// assert!(!err.is_repository_check_failure());
    /// ```
    #[must_use]
    pub const fn is_repository_check_failure(&self) -> bool {
        matches!(
            self,
            Self::DirtyWorkingTree { .. } | Self::UnpushedCommits { .. }
        )
    }

    /// Returns `true` if this error was raised while reading the manifest.
    #[must_use]
    pub const fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            Self::MissingManifest { .. } | Self::MalformedManifest { .. }
        )
    }
}

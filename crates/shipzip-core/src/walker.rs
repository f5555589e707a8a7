//! Directory tree walking with exclusion rules.
//!
//! Ignored directories are pruned before descent, so nothing below them is
//! ever read. Symlinks are not followed during descent; a symlink that
//! resolves to a regular file is packaged with its target's contents.

use crate::ExclusionRules;
use crate::PackageError;
use crate::Result;
use crate::filters;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks a source tree, yielding the files that survive the exclusion rules.
///
/// # Examples
///
/// ```no_run
/// use shipzip_core::ExclusionRules;
/// use shipzip_core::walker::FilteredWalker;
/// use std::path::Path;
///
/// let rules = ExclusionRules::default();
/// let walker = FilteredWalker::new(Path::new("./extension"), &rules);
///
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("would add: {}", entry.archive_path);
/// }
/// # Ok::<(), shipzip_core::PackageError>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    rules: &'a ExclusionRules,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a new filtered walker for the given root directory.
    #[must_use]
    pub fn new(root: &'a Path, rules: &'a ExclusionRules) -> Self {
        Self { root, rules }
    }

    /// Returns an iterator over the files to package, in walk order.
    ///
    /// Order follows the underlying directory listing and is not sorted.
    ///
    /// # Errors
    ///
    /// Items are errors if a directory cannot be read, metadata cannot be
    /// read, or a name is not valid UTF-8.
    pub fn walk(&self) -> impl Iterator<Item = Result<PackageEntry>> + '_ {
        let rules = self.rules;
        WalkDir::new(self.root)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_entry(move |entry| {
                let prune =
                    entry.file_type().is_dir() && filters::should_prune_dir(entry.path(), rules);
                if prune {
                    debug!(path = %entry.path().display(), "pruning ignored directory");
                }
                !prune
            })
            .filter_map(move |entry| match entry {
                Ok(entry) => self.build_entry(&entry).transpose(),
                Err(e) => Some(Err(PackageError::Io(std::io::Error::other(format!(
                    "walkdir error: {e}"
                ))))),
            })
    }

    /// Builds a `PackageEntry` from a `walkdir::DirEntry`.
    ///
    /// Returns `Ok(None)` for directories and for entries that are filtered
    /// out.
    fn build_entry(&self, entry: &DirEntry) -> Result<Option<PackageEntry>> {
        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return Ok(None);
        }

        let size = if file_type.is_file() {
            entry
                .metadata()
                .map_err(|e| {
                    PackageError::Io(std::io::Error::other(format!(
                        "cannot read metadata for {}: {e}",
                        path.display()
                    )))
                })?
                .len()
        } else if file_type.is_symlink() {
            match std::fs::metadata(path) {
                Ok(target) if target.is_file() => target.len(),
                Ok(_) => {
                    debug!(path = %path.display(), "skipping symlink to directory");
                    return Ok(None);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping dangling symlink");
                    return Ok(None);
                }
            }
        } else {
            warn!(path = %path.display(), "skipping special file");
            return Ok(None);
        };

        let archive_path = filters::archive_name(path, self.root)?;
        if filters::should_skip_file(&archive_path, self.rules) {
            debug!(path = %archive_path, "skipping ignored file");
            return Ok(None);
        }

        Ok(Some(PackageEntry {
            path: path.to_path_buf(),
            archive_path,
            size,
        }))
    }
}

/// A file selected for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Full filesystem path to the file.
    pub path: PathBuf,

    /// Root-relative name used inside the archive, `/`-separated.
    pub archive_path: String,

    /// Size in bytes at walk time.
    pub size: u64,
}

/// Collects all files under `root` that survive the exclusion rules.
///
/// # Errors
///
/// Returns an error if:
/// - `root` does not exist or is not a directory
/// - Directory traversal fails
/// - File metadata cannot be read
/// - A file name is not valid UTF-8
pub fn collect_files(root: &Path, rules: &ExclusionRules) -> Result<Vec<PackageEntry>> {
    if !root.is_dir() {
        return Err(PackageError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    FilteredWalker::new(root, rules).walk().collect()
}

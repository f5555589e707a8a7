//! Exclusion rules applied while collecting files to package.

use std::collections::BTreeSet;

/// Fixed exclusion configuration for the path filter.
///
/// All matching is exact-string or suffix-string; there is no glob or regex
/// support. Construct once and pass by reference into the walker.
///
/// # Examples
///
/// ```
/// use shipzip_core::ExclusionRules;
///
/// let rules = ExclusionRules::default();
/// assert!(rules.is_ignored_dir(".git"));
/// assert!(rules.is_ignored_file("notes.txt~", "notes.txt~"));
/// assert!(!rules.is_ignored_file("main.js", "src/main.js"));
///
/// let custom = ExclusionRules::empty().with_ignored_suffixes([".bak"]);
/// assert!(custom.is_ignored_file("a.bak", "a.bak"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Directory basenames pruned at any depth.
    pub ignored_dirs: BTreeSet<String>,

    /// File basenames skipped at any depth.
    pub ignored_files: BTreeSet<String>,

    /// Root-relative file paths (with `/` separators) skipped exactly.
    pub ignored_paths: BTreeSet<String>,

    /// File name suffixes that mark a file as skipped.
    pub ignored_suffixes: Vec<String>,
}

impl Default for ExclusionRules {
    /// Builtin rules:
    /// - directories: `.git`, `.mypy_cache`
    /// - file names: `.gitignore`
    /// - relative paths: `images/icon.svg`, `Makefile`, `README.md`
    /// - suffixes: `.zip`, `~`
    fn default() -> Self {
        Self::empty()
            .with_ignored_dirs([".git", ".mypy_cache"])
            .with_ignored_files([".gitignore"])
            .with_ignored_paths(["images/icon.svg", "Makefile", "README.md"])
            .with_ignored_suffixes([".zip", "~"])
    }
}

impl ExclusionRules {
    /// Creates a rule set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ignored_dirs: BTreeSet::new(),
            ignored_files: BTreeSet::new(),
            ignored_paths: BTreeSet::new(),
            ignored_suffixes: Vec::new(),
        }
    }

    /// Adds directory basenames to prune.
    #[must_use]
    pub fn with_ignored_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds file basenames to skip.
    #[must_use]
    pub fn with_ignored_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_files.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds root-relative paths to skip.
    #[must_use]
    pub fn with_ignored_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds file name suffixes to skip.
    #[must_use]
    pub fn with_ignored_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_suffixes
            .extend(suffixes.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if a directory with this basename must not be entered.
    #[must_use]
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    /// Returns `true` if a file must be left out of the package.
    ///
    /// `name` is the file's basename, `relative` its root-relative path with
    /// `/` separators.
    #[must_use]
    pub fn is_ignored_file(&self, name: &str, relative: &str) -> bool {
        self.has_ignored_suffix(name)
            || self.ignored_files.contains(name)
            || self.ignored_paths.contains(relative)
    }

    /// Returns `true` if `name` ends with any ignored suffix.
    #[must_use]
    pub fn has_ignored_suffix(&self, name: &str) -> bool {
        self.ignored_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}

//! Repository cleanliness check.
//!
//! Runs `git --no-optional-locks status --porcelain=v2 --branch` in the root
//! directory and refuses to package when the tree has local changes or the
//! branch is ahead of its upstream. The check only reads repository state:
//! without `--no-optional-locks`, `git status` takes `index.lock` and
//! rewrites a stale index.
//!
//! Parsing is done in two passes: lines are first partitioned into headers
//! (starting with `#`) and content, then the `branch.ab` header is selected
//! with a search that requires exactly one match.

use crate::PackageError;
use crate::Result;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Marker that starts every header line in a porcelain v2 report.
const HEADER_MARKER: char = '#';

/// Header key carrying the ahead/behind counts.
const AHEAD_BEHIND_KEY: &str = "branch.ab";

/// Arguments passed to git; the global option must precede the subcommand.
const STATUS_ARGS: [&str; 4] = ["--no-optional-locks", "status", "--porcelain=v2", "--branch"];

/// Source of a porcelain v2 status report for a directory.
pub trait StatusSource {
    /// Returns the raw `git status --porcelain=v2 --branch` output for
    /// `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::ExternalTool`] if the report cannot be
    /// produced.
    fn porcelain_status(&self, root: &Path) -> Result<String>;
}

/// Obtains the status report by running the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitCli {
    /// Creates a runner that invokes `git` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different executable instead of `git`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.program, STATUS_ARGS.join(" "))
    }
}

impl StatusSource for GitCli {
    fn porcelain_status(&self, root: &Path) -> Result<String> {
        debug!(root = %root.display(), command = %self.command_line(), "querying repository status");

        let output = Command::new(&self.program)
            .args(STATUS_ARGS)
            .current_dir(root)
            .output()
            .map_err(|e| PackageError::ExternalTool {
                command: self.command_line(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(PackageError::ExternalTool {
                command: self.command_line(),
                reason,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| PackageError::ExternalTool {
            command: self.command_line(),
            reason: format!("output is not valid UTF-8: {e}"),
        })
    }
}

/// Parsed porcelain v2 status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Commits on the local branch not on its upstream.
    pub ahead: u64,

    /// Commits on the upstream not on the local branch.
    pub behind: u64,

    /// Non-empty content lines, one per changed or untracked path.
    pub changes: Vec<String>,
}

impl StatusReport {
    /// Parses raw `git status --porcelain=v2 --branch` output.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::UnexpectedStatusFormat`] if there is not
    /// exactly one well-formed `# branch.ab +N -M` header, which is the case
    /// for a branch without an upstream.
    ///
    /// # Examples
    ///
    /// ```
    /// use shipzip_core::status::StatusReport;
    ///
    /// let output = "# branch.oid 1a2b\n# branch.head main\n# branch.upstream origin/main\n# branch.ab +1 -0\n";
    /// let report = StatusReport::parse(output).unwrap();
    /// assert_eq!(report.ahead, 1);
    /// assert!(report.changes.is_empty());
    /// ```
    pub fn parse(output: &str) -> Result<Self> {
        let (headers, content): (Vec<&str>, Vec<&str>) = output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .partition(|line| line.starts_with(HEADER_MARKER));

        let ab_line = single_match(headers.iter().copied().filter_map(ahead_behind_fields))?;
        let (ahead, behind) = parse_ahead_behind(ab_line)?;

        Ok(Self {
            ahead,
            behind,
            changes: content.into_iter().map(str::to_string).collect(),
        })
    }

    /// Returns `true` if there are no local changes and nothing to push.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty() && self.ahead == 0
    }

    /// Converts the report into a pass/fail result.
    ///
    /// Local changes are reported before unpushed commits.
    ///
    /// # Errors
    ///
    /// - [`PackageError::DirtyWorkingTree`] if any content line exists
    /// - [`PackageError::UnpushedCommits`] if the ahead count is non-zero
    pub fn ensure_clean(&self) -> Result<()> {
        if !self.changes.is_empty() {
            return Err(PackageError::DirtyWorkingTree {
                lines: self.changes.clone(),
            });
        }
        if self.ahead > 0 {
            return Err(PackageError::UnpushedCommits { ahead: self.ahead });
        }
        Ok(())
    }
}

/// Runs the cleanliness check for `root` using `source`.
///
/// # Errors
///
/// Returns [`PackageError::ExternalTool`] if the status cannot be queried,
/// [`PackageError::UnexpectedStatusFormat`] if it cannot be parsed, and
/// [`PackageError::DirtyWorkingTree`] or [`PackageError::UnpushedCommits`]
/// if the tree is not ready to package.
pub fn check_repository(root: &Path, source: &dyn StatusSource) -> Result<StatusReport> {
    let output = source.porcelain_status(root)?;
    let report = StatusReport::parse(&output)?;
    debug!(
        ahead = report.ahead,
        behind = report.behind,
        changes = report.changes.len(),
        "parsed repository status"
    );
    report.ensure_clean()?;
    Ok(report)
}

/// Returns the value part of a `# branch.ab ...` header, if `line` is one.
fn ahead_behind_fields(line: &str) -> Option<&str> {
    let body = line.strip_prefix(HEADER_MARKER)?.trim_start();
    let rest = body.strip_prefix(AHEAD_BEHIND_KEY)?;
    // Reject keys that merely share the prefix
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// Returns the only item of `matches`, failing on zero or several.
fn single_match<'a>(mut matches: impl Iterator<Item = &'a str>) -> Result<&'a str> {
    let first = matches
        .next()
        .ok_or_else(|| PackageError::UnexpectedStatusFormat {
            reason: format!("no '{AHEAD_BEHIND_KEY}' header (is an upstream branch configured?)"),
        })?;

    let extra = matches.count();
    if extra > 0 {
        return Err(PackageError::UnexpectedStatusFormat {
            reason: format!("expected one '{AHEAD_BEHIND_KEY}' header, found {}", extra + 1),
        });
    }

    Ok(first)
}

/// Parses `+<ahead> -<behind>`.
fn parse_ahead_behind(fields: &str) -> Result<(u64, u64)> {
    let malformed = || PackageError::UnexpectedStatusFormat {
        reason: format!("malformed '{AHEAD_BEHIND_KEY}' header: '{fields}'"),
    };

    let mut tokens = fields.split_whitespace();
    let (Some(ahead), Some(behind), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(malformed());
    };

    let ahead = ahead
        .strip_prefix('+')
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(malformed)?;
    let behind = behind
        .strip_prefix('-')
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(malformed)?;

    Ok((ahead, behind))
}

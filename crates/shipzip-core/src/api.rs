//! High-level public API for packaging a source tree.

use crate::ExclusionRules;
use crate::PackageConfig;
use crate::PackageReport;
use crate::ProgressCallback;
use crate::Result;
use crate::manifest::Manifest;
use crate::status::GitCli;
use crate::status::StatusSource;
use crate::status::check_repository;
use crate::template::render_output_path;
use crate::walker::PackageEntry;
use crate::walker::collect_files;
use crate::writer::create_archive;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// Packages `root` into a versioned zip archive.
///
/// Steps, in order: read the manifest version, check the git working tree
/// (unless disabled), collect files through the exclusion rules, write the
/// archive to the rendered output path.
///
/// # Errors
///
/// Every failure is fatal and returned as-is; see [`crate::PackageError`].
///
/// # Examples
///
/// ```no_run
/// use shipzip_core::NoopProgress;
/// use shipzip_core::PackageConfig;
/// use shipzip_core::package_directory;
/// use std::path::Path;
///
/// let config = PackageConfig::default().with_output_template("dist/ext-{version}.zip");
/// let report = package_directory(Path::new("./extension"), &config, &mut NoopProgress)?;
/// println!("wrote {}", report.output_path.display());
/// # Ok::<(), shipzip_core::PackageError>(())
/// ```
pub fn package_directory(
    root: &Path,
    config: &PackageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackageReport> {
    package_directory_with(root, config, &GitCli::new(), progress)
}

/// Same as [`package_directory`] with a custom source for the repository
/// status report.
///
/// # Errors
///
/// Every failure is fatal and returned as-is; see [`crate::PackageError`].
pub fn package_directory_with(
    root: &Path,
    config: &PackageConfig,
    status: &dyn StatusSource,
    progress: &mut dyn ProgressCallback,
) -> Result<PackageReport> {
    let start = Instant::now();
    let plan = plan_package(root, config, status)?;

    let mut report = create_archive(&plan.output_path, &plan.entries, config, progress)?;
    report.version = plan.manifest.version;
    report.name = plan.manifest.name;
    report.duration = start.elapsed();

    Ok(report)
}

/// Everything decided before the archive is written.
#[derive(Debug, Clone)]
pub struct PackagePlan {
    /// Parsed manifest.
    pub manifest: Manifest,

    /// Rendered output path.
    pub output_path: PathBuf,

    /// Files to add, in walk order.
    pub entries: Vec<PackageEntry>,
}

/// Runs every step except writing the archive.
///
/// Useful for previewing what would be packaged.
///
/// # Errors
///
/// Manifest, template, repository check and traversal errors.
pub fn plan_package(
    root: &Path,
    config: &PackageConfig,
    status: &dyn StatusSource,
) -> Result<PackagePlan> {
    config.validate()?;

    let manifest = Manifest::load(root)?;
    let output_path = render_output_path(&config.output_template, &manifest.version)?;
    debug!(version = %manifest.version, output = %output_path.display(), "read manifest");

    if config.check_repository {
        check_repository(root, status)?;
    } else {
        debug!("repository check disabled");
    }

    let entries = collect_package_files(root, &config.rules)?;

    Ok(PackagePlan {
        manifest,
        output_path,
        entries,
    })
}

/// Collects the files that would be packaged from `root`.
///
/// # Errors
///
/// Returns an error if `root` is not a directory or traversal fails.
pub fn collect_package_files(root: &Path, rules: &ExclusionRules) -> Result<Vec<PackageEntry>> {
    collect_files(root, rules)
}

//! Packaging reports and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a packaging run.
///
/// # Examples
///
/// ```
/// use shipzip_core::PackageReport;
///
/// let mut report = PackageReport::default();
/// report.bytes_written = 1000;
/// report.archive_size = 500;
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Version read from the manifest.
    pub version: String,

    /// Package name from the manifest, if declared.
    pub name: Option<String>,

    /// Path the archive was written to.
    pub output_path: PathBuf,

    /// Number of files added to the archive.
    pub files_added: usize,

    /// Total uncompressed bytes written into the archive.
    pub bytes_written: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// Duration of the whole run.
    pub duration: Duration,
}

impl PackageReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the space saved by compression as a percentage.
    ///
    /// Returns 0.0 if nothing was written or the archive is not smaller.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 || self.archive_size >= self.bytes_written {
            return 0.0;
        }
        (1.0 - self.archive_size as f64 / self.bytes_written as f64) * 100.0
    }
}

/// Callback trait for progress reporting while writing an archive.
///
/// # Examples
///
/// ```
/// use shipzip_core::ProgressCallback;
/// use std::path::Path;
///
/// struct PrintProgress;
///
/// impl ProgressCallback for PrintProgress {
///     fn on_start(&mut self, output: &Path, total: usize) {
///         println!("writing {total} files to {}", output.display());
///     }
///
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("[{current}/{total}] adding {name}");
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _name: &str) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called once the output file has been created.
    ///
    /// # Arguments
    ///
    /// * `output` - Path of the archive being written
    /// * `total` - Number of files that will be added
    fn on_start(&mut self, output: &Path, total: usize);

    /// Called before adding a file.
    ///
    /// # Arguments
    ///
    /// * `name` - Archive name of the file
    /// * `total` - Total number of files
    /// * `current` - Current file number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called for each chunk copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after a file has been fully added.
    fn on_entry_complete(&mut self, name: &str);

    /// Called when the archive has been finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&mut self, _output: &Path, _total: usize) {}

    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}

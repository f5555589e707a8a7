//! ZIP archive writing.
//!
//! Entries are written under their root-relative names with file contents
//! streamed through a reusable buffer. Only file entries are written;
//! directories are implied by entry names.
//!
//! If writing fails midway, the partially written output file is left on
//! disk.

use crate::PackageConfig;
use crate::PackageReport;
use crate::ProgressCallback;
use crate::Result;
use crate::walker::PackageEntry;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use tracing::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Size of the copy buffer shared by all entries.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Creates a ZIP archive at `output` containing `entries`.
///
/// Any existing file at `output` is truncated.
///
/// # Examples
///
/// ```no_run
/// use shipzip_core::ExclusionRules;
/// use shipzip_core::NoopProgress;
/// use shipzip_core::PackageConfig;
/// use shipzip_core::walker::collect_files;
/// use shipzip_core::writer::create_archive;
/// use std::path::Path;
///
/// let config = PackageConfig::default();
/// let entries = collect_files(Path::new("./extension"), &config.rules)?;
/// let report = create_archive(Path::new("package-1.0.zip"), &entries, &config, &mut NoopProgress)?;
/// println!("added {} files", report.files_added);
/// # Ok::<(), shipzip_core::PackageError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Output file cannot be created
/// - A source file cannot be read
/// - The zip writer fails
pub fn create_archive(
    output: &Path,
    entries: &[PackageEntry],
    config: &PackageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackageReport> {
    let file = File::create(output)?;
    progress.on_start(output, entries.len());

    let (file, mut report) = write_archive(file, entries, config, progress)?;

    report.archive_size = file.metadata()?.len();
    report.output_path = output.to_path_buf();
    info!(
        path = %output.display(),
        files = report.files_added,
        bytes = report.archive_size,
        "archive written"
    );

    Ok(report)
}

/// Writes `entries` as a ZIP archive into any seekable writer.
///
/// Returns the writer after the central directory has been written, along
/// with a report holding the entry counts.
///
/// # Errors
///
/// Returns an error if a source file cannot be read or the zip writer fails.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    entries: &[PackageEntry],
    config: &PackageConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<(W, PackageReport)> {
    let mut zip = ZipWriter::new(writer);
    let mut report = PackageReport::default();
    let options = entry_options(config);
    let total = entries.len();

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        progress.on_entry_start(&entry.archive_path, total, idx + 1);
        let written = add_file(&mut zip, entry, config, options, progress, &mut buffer)?;
        report.files_added += 1;
        report.bytes_written += written;
        progress.on_entry_complete(&entry.archive_path);
    }

    let writer = zip.finish()?;
    progress.on_complete();

    Ok((writer, report))
}

/// Builds the per-entry options for the configured compression.
fn entry_options(config: &PackageConfig) -> SimpleFileOptions {
    match config.compression_level {
        None => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        Some(level) => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level))),
    }
}

/// Adds a single file to the archive, returning the bytes copied.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &PackageEntry,
    config: &PackageConfig,
    options: SimpleFileOptions,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<u64> {
    let mut file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let mut file_options = options.large_file(metadata.len() >= u64::from(u32::MAX));
    if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file_options = file_options.unix_permissions(metadata.permissions().mode());
        }
    }

    zip.start_file(entry.archive_path.as_str(), file_options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

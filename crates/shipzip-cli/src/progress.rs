//! Per-file progress lines for CLI packaging runs.

use crate::output::OutputFormatter;
use shipzip_core::ProgressCallback;
use std::path::Path;

/// `ProgressCallback` that announces each step through the output formatter.
///
/// Prints the destination once, then one line per file as it is added.
pub struct CliProgress<'a> {
    formatter: &'a dyn OutputFormatter,
    bytes_written: u64,
}

impl<'a> CliProgress<'a> {
    #[must_use]
    pub fn new(formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            formatter,
            bytes_written: 0,
        }
    }
}

impl ProgressCallback for CliProgress<'_> {
    fn on_start(&mut self, output: &Path, _total: usize) {
        self.formatter.format_destination(output);
    }

    fn on_entry_start(&mut self, name: &str, _total: usize, _current: usize) {
        self.formatter.format_entry_added(name);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {
        tracing::debug!(bytes = self.bytes_written, "archive finished");
    }
}

//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use shipzip_core::PackagePlan;
use shipzip_core::PackageReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_destination(&self, output: &Path) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("writing to {}", output.display()));
    }

    fn format_entry_added(&self, name: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("adding {name} to the archive"));
    }

    fn format_package_result(&self, report: &PackageReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Package created: {}",
                style("✓").green().bold(),
                report.output_path.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Package created: {}",
                report.output_path.display()
            ));
        }

        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&format!("  Version:          {}", report.version));
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));

        if self.verbose {
            if let Some(name) = &report.name {
                let _ = self.term.write_line(&format!("  Name:             {name}"));
            }
            let compression = report.compression_percentage();
            if compression > 0.0 {
                let _ = self
                    .term
                    .write_line(&format!("  Compression:      {compression:.1}%"));
            }
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        Ok(())
    }

    fn format_plan(&self, plan: &PackagePlan) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "would write {} (version {})",
            plan.output_path.display(),
            plan.manifest.version
        ));
        for entry in &plan.entries {
            let _ = self.term.write_line(&format!("  {}", entry.archive_path));
        }

        let total: u64 = plan.entries.iter().map(|entry| entry.size).sum();
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} files, {}",
            Self::format_number(plan.entries.len()),
            Self::format_size(total)
        ));

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

//! JSON output formatter for machine-readable results.
//!
//! Progress lines are suppressed so stdout carries a single JSON document.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use shipzip_core::PackagePlan;
use shipzip_core::PackageReport;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PackageOutput {
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    output_path: String,
    files_added: usize,
    bytes_written: u64,
    archive_size: u64,
    compression_percentage: f64,
    duration_ms: u128,
}

#[derive(Serialize)]
struct PlanOutput {
    version: String,
    output_path: String,
    files: Vec<String>,
}

impl From<&PackageReport> for PackageOutput {
    fn from(report: &PackageReport) -> Self {
        Self {
            version: report.version.clone(),
            name: report.name.clone(),
            output_path: report.output_path.display().to_string(),
            files_added: report.files_added,
            bytes_written: report.bytes_written,
            archive_size: report.archive_size,
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl From<&PackagePlan> for PlanOutput {
    fn from(plan: &PackagePlan) -> Self {
        Self {
            version: plan.manifest.version.clone(),
            output_path: plan.output_path.display().to_string(),
            files: plan
                .entries
                .iter()
                .map(|entry| entry.archive_path.clone())
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_destination(&self, _output: &Path) {}

    fn format_entry_added(&self, _name: &str) {}

    fn format_package_result(&self, report: &PackageReport) -> Result<()> {
        Self::output(&JsonOutput::success("package", PackageOutput::from(report)))
    }

    fn format_plan(&self, plan: &PackagePlan) -> Result<()> {
        Self::output(&JsonOutput::success("dry-run", PlanOutput::from(plan)))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("package", format!("{error:#}"));
        if let Ok(json) = serde_json::to_string_pretty(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}

//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use shipzip_core::PackagePlan;
use shipzip_core::PackageReport;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Announce the archive being written
    fn format_destination(&self, output: &Path);

    /// Report one file as it is added
    fn format_entry_added(&self, name: &str);

    /// Format the result of a packaging run
    fn format_package_result(&self, report: &PackageReport) -> Result<()>;

    /// Format the files a dry run would package
    fn format_plan(&self, plan: &PackagePlan) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

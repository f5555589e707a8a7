//! Versioned zip packaging of source trees.
//!
//! `shipzip-core` reads a package version from `manifest.json`, optionally
//! checks that the git working tree is clean and pushed, collects files
//! through fixed exclusion rules and writes them into a zip archive named
//! after the version.
//!
//! # Examples
//!
//! ```no_run
//! use shipzip_core::NoopProgress;
//! use shipzip_core::PackageConfig;
//! use shipzip_core::package_directory;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackageConfig::default();
//! let report = package_directory(Path::new("./extension"), &config, &mut NoopProgress)?;
//! println!("Packaged {} files into {}", report.files_added, report.output_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod manifest;
pub mod report;
pub mod rules;
pub mod status;
pub mod template;
pub mod walker;
pub mod writer;

// Re-export main API types
pub use api::PackagePlan;
pub use api::collect_package_files;
pub use api::package_directory;
pub use api::package_directory_with;
pub use api::plan_package;
pub use config::PackageConfig;
pub use error::PackageError;
pub use error::Result;
pub use manifest::Manifest;
pub use report::NoopProgress;
pub use report::PackageReport;
pub use report::ProgressCallback;
pub use rules::ExclusionRules;
pub use status::GitCli;
pub use status::StatusReport;
pub use status::StatusSource;
pub use walker::PackageEntry;

//! Reading the package manifest.
//!
//! The manifest is a JSON document at a fixed location in the root
//! directory. Only its `version` field is required.

use crate::PackageError;
use crate::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

/// File name of the manifest, relative to the root directory.
pub const MANIFEST_NAME: &str = "manifest.json";

/// The subset of the manifest this tool reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Package version substituted into the output path.
    pub version: String,

    /// Package name, if declared.
    #[serde(default)]
    pub name: Option<String>,
}

impl Manifest {
    /// Loads and parses `manifest.json` from `root`.
    ///
    /// The file is re-read on every call.
    ///
    /// # Errors
    ///
    /// - [`PackageError::MissingManifest`] if the file cannot be opened
    /// - [`PackageError::MalformedManifest`] if it is not valid JSON or has
    ///   no string `version`
    pub fn load(root: &Path) -> Result<Self> {
        let path = manifest_path(root);
        let file = File::open(&path).map_err(|source| PackageError::MissingManifest {
            path: path.clone(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            PackageError::MalformedManifest {
                path,
                reason: e.to_string(),
            }
        })
    }
}

/// Returns the manifest location for a root directory.
#[must_use]
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_NAME)
}

/// Reads the `version` string from `<root>/manifest.json`.
///
/// # Examples
///
/// ```no_run
/// use shipzip_core::manifest::read_version;
/// use std::path::Path;
///
/// let version = read_version(Path::new("./extension"))?;
/// println!("packaging version {version}");
/// # Ok::<(), shipzip_core::PackageError>(())
/// ```
pub fn read_version(root: &Path) -> Result<String> {
    Manifest::load(root).map(|manifest| manifest.version)
}

//! Configuration for packaging operations.

use crate::ExclusionRules;
use crate::PackageError;
use crate::Result;
use crate::template::DEFAULT_OUTPUT_TEMPLATE;

/// Configuration for a packaging run.
///
/// # Examples
///
/// ```
/// use shipzip_core::PackageConfig;
///
/// // Defaults: check git, store entries uncompressed
/// let config = PackageConfig::default();
/// assert!(config.check_repository);
///
/// let custom = PackageConfig::default()
///     .with_output_template("dist/ext-{version}.zip")
///     .with_check_repository(false)
///     .with_compression_level(9);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Files and directories left out of the archive.
    ///
    /// Default: [`ExclusionRules::default`].
    pub rules: ExclusionRules,

    /// Output path template; `{version}` is replaced with the manifest
    /// version.
    ///
    /// Default: `package-{version}.zip`.
    pub output_template: String,

    /// Refuse to package unless the git working tree is clean and pushed.
    ///
    /// Default: `true`.
    pub check_repository: bool,

    /// Deflate compression level (1-9).
    ///
    /// `None` stores entries without compression.
    ///
    /// Default: `None`.
    pub compression_level: Option<u8>,

    /// Record Unix permission bits for each entry.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            rules: ExclusionRules::default(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            check_repository: true,
            compression_level: None,
            preserve_permissions: true,
        }
    }
}

impl PackageConfig {
    /// Creates a new `PackageConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusion rules.
    #[must_use]
    pub fn with_rules(mut self, rules: ExclusionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the output path template.
    #[must_use]
    pub fn with_output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = template.into();
        self
    }

    /// Sets whether to run the repository cleanliness check.
    #[must_use]
    pub fn with_check_repository(mut self, check: bool) -> Self {
        self.check_repository = check;
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(PackageError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

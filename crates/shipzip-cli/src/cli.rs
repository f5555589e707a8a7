//! CLI argument parsing using clap.

use clap::Parser;
use shipzip_core::template::DEFAULT_OUTPUT_TEMPLATE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shipzip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct PackageArgs {
    /// Root directory of the sources to package
    #[arg(value_name = "ROOT_DIRECTORY")]
    pub root: PathBuf,

    /// Archive to write; {version} is replaced with the package version
    #[arg(short, long, value_name = "TEMPLATE", default_value = DEFAULT_OUTPUT_TEMPLATE)]
    pub output: String,

    /// Skip the check that the git working tree is clean and pushed
    #[arg(long = "no-check-git", visible_alias = "no-check-version")]
    pub no_check_git: bool,

    /// Deflate compression level (1-9); entries are stored uncompressed by default
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// List the files that would be packaged without writing the archive
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["shipzip", "ext"]).unwrap();
        assert_eq!(cli.package.root, PathBuf::from("ext"));
        assert_eq!(cli.package.output, "package-{version}.zip");
        assert!(!cli.package.no_check_git);
        assert_eq!(cli.package.compression_level, None);
        assert!(!cli.package.dry_run);
    }

    #[test]
    fn test_output_and_skip_check() {
        let cli =
            Cli::try_parse_from(["shipzip", "-o", "pkg-{version}.zip", "--no-check-git", "ext"])
                .unwrap();
        assert_eq!(cli.package.output, "pkg-{version}.zip");
        assert!(cli.package.no_check_git);
    }

    #[test]
    fn test_no_check_version_alias() {
        let cli = Cli::try_parse_from(["shipzip", "--no-check-version", "ext"]).unwrap();
        assert!(cli.package.no_check_git);
    }

    #[test]
    fn test_compression_level_range() {
        let cli = Cli::try_parse_from(["shipzip", "-l", "9", "ext"]).unwrap();
        assert_eq!(cli.package.compression_level, Some(9));

        assert!(Cli::try_parse_from(["shipzip", "-l", "0", "ext"]).is_err());
        assert!(Cli::try_parse_from(["shipzip", "-l", "10", "ext"]).is_err());
    }

    #[test]
    fn test_root_is_required() {
        assert!(Cli::try_parse_from(["shipzip"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["shipzip", "-q", "-v", "ext"]).is_err());
    }
}

//! Package command implementation.

use crate::cli::PackageArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use shipzip_core::GitCli;
use shipzip_core::PackageConfig;
use shipzip_core::package_directory;
use shipzip_core::plan_package;

pub fn execute(args: &PackageArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = build_config(args);

    if args.dry_run {
        let plan = add_package_context(
            plan_package(&args.root, &config, &GitCli::new()),
            &args.root,
        )?;
        return formatter.format_plan(&plan);
    }

    let mut progress = CliProgress::new(formatter);
    let report = add_package_context(
        package_directory(&args.root, &config, &mut progress),
        &args.root,
    )?;

    formatter.format_package_result(&report)?;

    Ok(())
}

fn build_config(args: &PackageArgs) -> PackageConfig {
    let config = PackageConfig::default()
        .with_output_template(args.output.as_str())
        .with_check_repository(!args.no_check_git);

    match args.compression_level {
        Some(level) => config.with_compression_level(level),
        None => config,
    }
}

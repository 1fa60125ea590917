//! farbucket CLI - Builds the runner variant matrix and publishes the bucket
//!
//! Runs the generator and build executor for every selected
//! (architecture, runtime mode) variant, packages the runners into the
//! staging bucket, and uploads it or builds a local archive.

use anyhow::{Context, Result};
use clap::Parser;
use farbucket::process::{CipdClient, GnNinjaRunner, PmSigner};
use farbucket::{
    BucketContext, HostOs, PipelineConfig, PipelineError, Toolset, VariantBuildPlanner,
};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

mod cli;
mod logging;
mod report;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<PipelineError>()
                .map_or(1, PipelineError::exit_code);
            exit_code(code)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let search_root = cli.src_root.as_deref().unwrap_or(Path::new("."));
    let mut config = PipelineConfig::load(cli.config.as_deref(), search_root)
        .context("Failed to load configuration")?;

    if let Some(root) = &cli.src_root {
        config.paths.src_root = root.clone();
    }
    config.paths.src_root = std::path::absolute(&config.paths.src_root)
        .context("Failed to resolve source root")?;
    config.validate().context("Invalid configuration")?;
    debug!(config = ?config, "configuration loaded");

    let ctx = BucketContext::from_config(&config, HostOs::current());
    let options = cli.run_options();

    if cli.dry_run {
        let planner = VariantBuildPlanner::new(options.request, config.build.targets.clone());
        report::print_plan(&planner, &ctx, &options);
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = farbucket::run(
        &options,
        &ctx,
        &config.build.targets,
        Toolset {
            builder: &mut GnNinjaRunner::from_config(&config),
            signer: &mut PmSigner::from_config(&config),
            registry: &mut CipdClient::from_config(&config),
        },
    )?;

    report::print_summary(&outcome.summary);
    Ok(exit_code(outcome.exit_code))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

//! Whole-run orchestration: plan, build, package, publish.

use crate::planner::{PlanRequest, RunSummary, VariantBuildPlanner};
use farbucket_bundle::publish;
use farbucket_core::{
    BucketContext, BuildRunner, PackageSigner, PipelineError, PipelineResult, RegistryClient,
};
use tracing::{error, info};

/// Options for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub request: PlanRequest,
    /// Publish to the registry instead of building a local archive
    pub upload: bool,
    /// Registry tag for uploads
    pub engine_version: Option<String>,
}

/// The external collaborators a run drives.
pub struct Toolset<'a> {
    pub builder: &'a mut dyn BuildRunner,
    pub signer: &'a mut dyn PackageSigner,
    pub registry: &'a mut dyn RegistryClient,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub summary: RunSummary,
}

/// Execute a full run.
///
/// Builds and packaging always happen before the upload options are
/// checked, so an upload without a version still leaves a complete bucket
/// and ends with exit code 1. Any other failure is returned as an error.
pub fn run(
    options: &RunOptions,
    ctx: &BucketContext,
    targets: &[String],
    tools: Toolset<'_>,
) -> PipelineResult<RunOutcome> {
    let planner = VariantBuildPlanner::new(options.request, targets.to_vec());
    let mut summary = planner.execute(ctx, tools.builder, tools.signer)?;

    match publish(
        ctx,
        tools.registry,
        options.engine_version.as_deref(),
        options.upload,
    ) {
        Ok(outcome) => {
            info!(outcome = ?outcome, "bucket published");
            summary.publish = Some(outcome);
            Ok(RunOutcome {
                exit_code: 0,
                summary,
            })
        }
        Err(e @ PipelineError::Configuration(_)) => {
            error!(error = %e, "not publishing");
            Ok(RunOutcome {
                exit_code: e.exit_code(),
                summary,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "driver/driver_tests.rs"]
mod driver_tests;

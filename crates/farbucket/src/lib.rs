//! # farbucket
//!
//! Builds every (architecture × runtime mode) variant of the runner
//! packages, assembles the resulting far packages and host binaries into a
//! staging bucket, and publishes the bucket to a package registry.
//!
//! The pipeline is strictly sequential. Every external tool sits behind a
//! trait ([`BuildRunner`], [`PackageSigner`], [`RegistryClient`]) with a
//! process-backed implementation in [`process`].
//!
//! ## Running a build
//!
//! ```no_run
//! use farbucket::prelude::*;
//! use farbucket::process::{CipdClient, GnNinjaRunner, PmSigner};
//! use std::path::Path;
//!
//! fn main() -> PipelineResult<()> {
//!     let config = PipelineConfig::load(None, Path::new("."))?;
//!     let ctx = BucketContext::from_config(&config, HostOs::current());
//!     let options = RunOptions {
//!         request: PlanRequest {
//!             archs: ArchFilter::Only(Arch::X64),
//!             ..PlanRequest::default()
//!         },
//!         ..RunOptions::default()
//!     };
//!
//!     let outcome = farbucket::run(
//!         &options,
//!         &ctx,
//!         &config.build.targets,
//!         Toolset {
//!             builder: &mut GnNinjaRunner::from_config(&config),
//!             signer: &mut PmSigner::from_config(&config),
//!             registry: &mut CipdClient::from_config(&config),
//!         },
//!     )?;
//!     std::process::exit(outcome.exit_code);
//! }
//! ```

pub mod driver;
pub mod planner;
pub mod process;

pub use driver::{RunOptions, RunOutcome, Toolset, run};
pub use planner::{
    FORCE_DISABLE_LTO, PlanRequest, PlannedPackage, PlannedVariant, RunSummary, VariantBuildPlanner,
    VariantRecord,
};

// Re-export core types
pub use farbucket_core::{
    Arch, ArchFilter, BucketContext, BuildRunner, BuildVariant, DEFAULT_CONFIG_FILE, ExecMode,
    HostOs, ModeFilter, PackageSigner, PipelineConfig, PipelineError, PipelineResult,
    RegistryClient, RunnerKind, RuntimeMode, SubVariant, ToolStatus, VariantState, layout,
};

// Re-export bundle types
pub use farbucket_bundle::{AssembledPackage, CollectReport, PublishOutcome};

// Re-export the lower crates for direct access
pub use farbucket_bundle;
pub use farbucket_core;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::driver::{RunOptions, RunOutcome, Toolset};
    pub use crate::planner::{PlanRequest, RunSummary, VariantBuildPlanner};
    pub use farbucket_bundle::PublishOutcome;
    pub use farbucket_core::prelude::*;
}

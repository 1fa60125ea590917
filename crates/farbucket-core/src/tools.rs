//! Interfaces to the external tools the pipeline drives.
//!
//! Every call is synchronous, attempt-once, and has no timeout. An
//! implementation reports a failed invocation as
//! [`PipelineError::ExternalTool`](crate::PipelineError::ExternalTool) and
//! leaves the tool's own diagnostics on the inherited stdio.

use crate::error::PipelineResult;
use std::path::{Path, PathBuf};

/// Build generation followed by build execution for one variant.
pub trait BuildRunner {
    /// Generate `variant_dir` with `flags`, then build `targets` in it.
    fn run_build_variant(
        &mut self,
        variant_dir: &Path,
        flags: &[String],
        targets: &[String],
    ) -> PipelineResult<()>;
}

/// Far packaging and signing.
pub trait PackageSigner {
    /// Package `raw_dir` signed with `signing_key` into `output_dir`, returning
    /// the path of the produced package file.
    fn sign_and_package(
        &mut self,
        raw_dir: &Path,
        signing_key: &Path,
        output_dir: &Path,
    ) -> PipelineResult<PathBuf>;
}

/// Package registry client.
pub trait RegistryClient {
    /// Create a registry revision from `descriptor`, tagged with `version`
    /// and moved to the `latest` ref.
    fn publish_revision(&mut self, descriptor: &Path, version: &str) -> PipelineResult<()>;

    /// Build a local archive from `descriptor` at `output`.
    fn build_local_archive(&mut self, descriptor: &Path, output: &Path) -> PipelineResult<()>;
}

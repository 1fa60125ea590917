//! Variant-matrix build planning and execution.
//!
//! The planner expands the caller's architecture and mode filters into the
//! ordered list of [`BuildVariant`]s, drives the build collaborator for each
//! one, and places every sub-variant's package and optional artifacts into
//! the bucket.

use farbucket_bundle::fs::remove_path_if_exists;
use farbucket_bundle::{
    AssembledPackage, CollectReport, PackageAssembler, PackageRequest, PublishOutcome,
    collect_optional_artifacts,
};
use farbucket_core::layout;
use farbucket_core::{
    Arch, ArchFilter, BucketContext, BuildRunner, BuildVariant, ModeFilter, PackageSigner,
    PipelineResult, RuntimeMode, VariantState,
};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Link-time optimization is never enabled for bucket builds, whatever the
/// caller asks for.
pub const FORCE_DISABLE_LTO: bool = true;

/// Which variants to process and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanRequest {
    pub archs: ArchFilter,
    pub modes: ModeFilter,
    /// Package whatever is already in the output directories without building
    pub skip_build: bool,
    /// Caller's LTO preference; see [`FORCE_DISABLE_LTO`]
    pub enable_lto: bool,
}

/// One package the plan will place in the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPackage {
    pub runner: String,
    /// Build target that produces the runner
    pub target: String,
    pub dest_dir: PathBuf,
}

/// Everything the plan will do for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedVariant {
    pub variant: BuildVariant,
    pub output_dir: PathBuf,
    /// Generator flags, or `None` under skip-build
    pub build_flags: Option<Vec<String>>,
    pub packages: Vec<PlannedPackage>,
}

/// Result of processing one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub variant: BuildVariant,
    pub state: VariantState,
    pub packages: Vec<AssembledPackage>,
    pub artifacts: CollectReport,
}

impl VariantRecord {
    fn new(variant: BuildVariant) -> Self {
        Self {
            variant,
            state: VariantState::Pending,
            packages: Vec::new(),
            artifacts: CollectReport::default(),
        }
    }

    fn advance(&mut self, next: VariantState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid variant transition {} -> {}",
            self.state,
            next
        );
        info!(variant = %self.variant, from = %self.state, to = %next, "variant state");
        self.state = next;
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub variants: Vec<VariantRecord>,
    pub builds_run: usize,
    /// Filled in by the driver once the bucket is published
    pub publish: Option<PublishOutcome>,
}

impl RunSummary {
    pub fn packages_assembled(&self) -> usize {
        self.variants.iter().map(|v| v.packages.len()).sum()
    }

    pub fn artifacts_copied(&self) -> usize {
        self.variants.iter().map(|v| v.artifacts.copied.len()).sum()
    }

    pub fn artifacts_missing(&self) -> usize {
        self.variants.iter().map(|v| v.artifacts.missing.len()).sum()
    }
}

/// Expands a [`PlanRequest`] into builds and bucket placements.
#[derive(Debug, Clone)]
pub struct VariantBuildPlanner {
    request: PlanRequest,
    targets: Vec<String>,
}

impl VariantBuildPlanner {
    /// Create a planner that builds `targets` for every selected variant.
    pub fn new(request: PlanRequest, targets: Vec<String>) -> Self {
        Self { request, targets }
    }

    pub fn request(&self) -> &PlanRequest {
        &self.request
    }

    /// Selected variants, architecture outer and mode inner.
    ///
    /// A filter combination that selects nothing yields an empty list.
    pub fn variants(&self) -> Vec<BuildVariant> {
        self.request
            .archs
            .archs()
            .into_iter()
            .flat_map(|arch: Arch| {
                RuntimeMode::ALL
                    .into_iter()
                    .filter(|mode| self.request.modes.matches(*mode))
                    .map(move |mode| BuildVariant::new(arch, mode))
            })
            .collect()
    }

    /// Whether LTO ends up enabled for this run.
    pub fn lto_enabled(&self) -> bool {
        self.request.enable_lto && !FORCE_DISABLE_LTO
    }

    /// Generator flags for `variant`.
    pub fn build_flags(&self, variant: &BuildVariant) -> Vec<String> {
        let mut flags = vec![
            "--fuchsia".to_string(),
            "--fuchsia-cpu".to_string(),
            variant.arch().to_string(),
            "--runtime-mode".to_string(),
            variant.mode().to_string(),
        ];
        if !self.lto_enabled() {
            flags.push("--no-lto".to_string());
        }
        flags
    }

    /// Resolve the plan without running anything.
    pub fn plan(&self, ctx: &BucketContext) -> Vec<PlannedVariant> {
        self.variants()
            .into_iter()
            .map(|variant| PlannedVariant {
                output_dir: ctx.variant_output_dir(&variant),
                build_flags: (!self.request.skip_build).then(|| self.build_flags(&variant)),
                packages: variant
                    .sub_variants()
                    .iter()
                    .map(|sub| PlannedPackage {
                        runner: layout::sub_variant_runner_name(sub),
                        target: layout::runner_target(sub),
                        dest_dir: ctx.bucket_leaf(&variant, sub.exec),
                    })
                    .collect(),
                variant,
            })
            .collect()
    }

    /// Build and package every selected variant into the bucket.
    ///
    /// A fresh build clears the bucket first; skip-build reuses it so
    /// earlier placements survive. The first failure stops the run and
    /// leaves the bucket as it is.
    pub fn execute(
        &self,
        ctx: &BucketContext,
        builder: &mut dyn BuildRunner,
        signer: &mut dyn PackageSigner,
    ) -> PipelineResult<RunSummary> {
        if self.request.enable_lto && FORCE_DISABLE_LTO {
            warn!("LTO was requested but is disabled for bucket builds");
        }

        if !self.request.skip_build {
            info!(bucket = %ctx.bucket_root.display(), "clearing bucket");
            remove_path_if_exists(&ctx.bucket_root)?;
        }

        let mut summary = RunSummary::default();
        let mut assembler = PackageAssembler::new(signer, &ctx.signing_key);

        for variant in self.variants() {
            let mut record = VariantRecord::new(variant);

            match self.process_variant(ctx, builder, &mut assembler, &mut record) {
                Ok(built) => {
                    if built {
                        summary.builds_run += 1;
                    }
                    summary.variants.push(record);
                }
                Err(e) => {
                    record.advance(VariantState::Failed);
                    error!(variant = %variant, error = %e, "variant failed, stopping");
                    return Err(e);
                }
            }
        }

        info!(
            variants = summary.variants.len(),
            builds = summary.builds_run,
            packages = summary.packages_assembled(),
            "bucket populated"
        );
        Ok(summary)
    }

    /// Returns whether a build ran.
    fn process_variant(
        &self,
        ctx: &BucketContext,
        builder: &mut dyn BuildRunner,
        assembler: &mut PackageAssembler<'_>,
        record: &mut VariantRecord,
    ) -> PipelineResult<bool> {
        let variant = record.variant;
        let output_dir = ctx.variant_output_dir(&variant);

        let built = if self.request.skip_build {
            info!(variant = %variant, "skipping build");
            false
        } else {
            record.advance(VariantState::Building);
            let flags = self.build_flags(&variant);
            info!(variant = %variant, flags = %flags.join(" "), "building variant");
            builder.run_build_variant(&output_dir, &flags, &self.targets)?;
            true
        };

        record.advance(VariantState::Packaging);
        for sub in variant.sub_variants() {
            let request = PackageRequest::for_sub_variant(ctx, &variant, &sub);
            let package = assembler.assemble(&request)?;
            record.packages.push(package);

            let report = collect_optional_artifacts(
                &output_dir,
                &request.dest_dir,
                &layout::optional_artifacts(&sub),
            )?;
            record.artifacts.merge(report);
        }
        record.advance(VariantState::Done);

        Ok(built)
    }
}

//! farbucket-core - Variant types, bucket layout, and configuration
//!
//! This crate provides the foundational types shared by the bucket pipeline:
//! - [`BuildVariant`] and [`SubVariant`] for the (arch × mode) build matrix
//! - [`layout`] for the canonical output and bucket paths
//! - [`VariantState`] for per-variant progress
//! - [`PipelineConfig`] and [`BucketContext`] for run configuration
//! - [`PipelineError`] for error handling
//! - [`tools`] for the external tool interfaces

mod config;
mod error;
mod state;
mod variant;

pub mod layout;
pub mod tools;

pub use config::{
    BucketContext, BuildConfig, DEFAULT_CONFIG_FILE, DESCRIPTOR_FILE, HostOs, LOCAL_ARCHIVE_FILE,
    PathsConfig, PipelineConfig, ToolsConfig,
};
pub use error::{PipelineError, PipelineResult, ToolStatus};
pub use layout::ArtifactSpec;
pub use state::VariantState;
pub use tools::{BuildRunner, PackageSigner, RegistryClient};
pub use variant::{
    Arch, ArchFilter, BuildVariant, ExecMode, ModeFilter, PRODUCT_MODES, RunnerKind, RuntimeMode,
    SubVariant,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Arch, ArchFilter, BucketContext, BuildRunner, BuildVariant, ExecMode, HostOs, ModeFilter,
        PackageSigner, PipelineConfig, PipelineError, PipelineResult, RegistryClient, RunnerKind,
        RuntimeMode, SubVariant, VariantState,
    };
}

//! Artifact collection, far packaging, and publishing for the bucket
//!
//! This crate places everything a build variant produced into the staging
//! bucket and hands the finished bucket to the registry:
//! - [`collect_optional_artifacts`] copies snapshot and tester binaries
//! - [`PackageAssembler`] signs raw package directories into far packages
//! - [`publish`] uploads the bucket or builds a local archive
//!
//! # Example
//!
//! ```no_run
//! use farbucket_bundle::{PackageAssembler, PackageRequest};
//! use farbucket_core::{Arch, BucketContext, BuildVariant, HostOs, PackageSigner, RuntimeMode};
//!
//! fn package_all(signer: &mut dyn PackageSigner) -> farbucket_core::PipelineResult<()> {
//!     let ctx = BucketContext::rooted_at("/src/engine", HostOs::current());
//!     let variant = BuildVariant::new(Arch::X64, RuntimeMode::Release);
//!     let mut assembler = PackageAssembler::new(signer, &ctx.signing_key);
//!
//!     for sub in variant.sub_variants() {
//!         assembler.assemble(&PackageRequest::for_sub_variant(&ctx, &variant, &sub))?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod collector;
pub mod fs;
pub mod publisher;

pub use assembler::{
    AssembledPackage, PackageAssembler, PackageMeta, PackageRequest, SdkCopy, compute_sha256,
    read_meta_package, write_meta_package,
};
pub use collector::{CollectReport, collect_optional_artifacts};
pub use publisher::{PublishOutcome, publish};

//! Far package assembly.
//!
//! Turns a runner's raw package directory from the build output into a
//! signed far package inside the bucket, and places the runner kind's patched
//! SDK next to it once.

use crate::fs::{copy_path, ensure_dir};
use farbucket_core::layout::{self, PACKAGE_VERSION};
use farbucket_core::{
    BucketContext, BuildVariant, PackageSigner, PipelineError, PipelineResult, SubVariant,
    ToolStatus,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of the package metadata file inside a raw package directory.
pub const META_PACKAGE_FILE: &str = "meta/package";

/// Contents of `meta/package`: the runner identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMeta {
    pub name: String,
    pub version: String,
}

impl PackageMeta {
    #[must_use]
    pub fn new(runner: &str) -> Self {
        Self {
            name: runner.to_string(),
            version: PACKAGE_VERSION.to_string(),
        }
    }
}

/// Every path involved in packaging one sub-variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Runner identity, e.g. `dart_aot_product_runner`
    pub runner: String,
    /// Raw package directory in the build output
    pub raw_dir: PathBuf,
    /// Bucket leaf the package is written to
    pub dest_dir: PathBuf,
    /// Patched SDK directory in the build output
    pub sdk_source: PathBuf,
    /// Where the patched SDK lives in the bucket leaf
    pub sdk_dest: PathBuf,
}

impl PackageRequest {
    /// Resolve the request for one sub-variant of `variant`.
    #[must_use]
    pub fn for_sub_variant(ctx: &BucketContext, variant: &BuildVariant, sub: &SubVariant) -> Self {
        let runner = layout::sub_variant_runner_name(sub);
        let output_dir = ctx.variant_output_dir(variant);
        let dest_dir = ctx.bucket_leaf(variant, sub.exec);
        let sdk_dir_name = layout::patched_sdk_dir_name(sub.kind);

        Self {
            raw_dir: output_dir.join(layout::far_dir_name(&runner)),
            sdk_source: output_dir.join(&sdk_dir_name),
            sdk_dest: dest_dir.join(&sdk_dir_name),
            dest_dir,
            runner,
        }
    }
}

/// What happened to the patched SDK of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkCopy {
    /// Copied into the bucket by this call
    Copied,
    /// Already in the bucket; left untouched
    AlreadyPresent,
    /// The build output has no patched SDK for this runner kind
    NotBuilt,
}

/// A package placed in the bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPackage {
    pub runner: String,
    pub path: PathBuf,
    /// Hex-encoded SHA-256 of the package file
    pub sha256: String,
    pub sdk: SdkCopy,
}

/// Signs raw package directories into the bucket.
pub struct PackageAssembler<'a> {
    signer: &'a mut dyn PackageSigner,
    signing_key: PathBuf,
}

impl<'a> PackageAssembler<'a> {
    /// Create an assembler that signs with `signing_key`.
    pub fn new(signer: &'a mut dyn PackageSigner, signing_key: impl Into<PathBuf>) -> Self {
        Self {
            signer,
            signing_key: signing_key.into(),
        }
    }

    /// Package one runner.
    ///
    /// 1. Writes `meta/package` into the raw directory.
    /// 2. Signs and packages it into `dest_dir`; a tool failure aborts here.
    /// 3. Copies the patched SDK into `dest_dir` unless it is already there.
    pub fn assemble(&mut self, request: &PackageRequest) -> PipelineResult<AssembledPackage> {
        write_meta_package(&request.raw_dir, &request.runner)?;

        ensure_dir(&request.dest_dir)?;
        let path =
            self.signer
                .sign_and_package(&request.raw_dir, &self.signing_key, &request.dest_dir)?;

        let contents = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                PipelineError::tool("package signer", ToolStatus::MissingOutput(path.clone()))
            }
            _ => PipelineError::fs(&path, e),
        })?;
        let sha256 = compute_sha256(&contents);

        let sdk = copy_sdk_once(&request.sdk_source, &request.sdk_dest)?;

        info!(
            runner = %request.runner,
            package = %path.display(),
            sha256 = %sha256,
            "package assembled"
        );

        Ok(AssembledPackage {
            runner: request.runner.clone(),
            path,
            sha256,
            sdk,
        })
    }
}

/// Write the package metadata describing `runner` into `raw_dir`.
pub fn write_meta_package(raw_dir: &Path, runner: &str) -> PipelineResult<PathBuf> {
    let meta_path = raw_dir.join(META_PACKAGE_FILE);
    if let Some(parent) = meta_path.parent() {
        ensure_dir(parent)?;
    }

    let json = serde_json::to_string(&PackageMeta::new(runner))?;
    fs::write(&meta_path, json).map_err(|e| PipelineError::fs(&meta_path, e))?;

    Ok(meta_path)
}

/// Read the package metadata previously written into `raw_dir`.
pub fn read_meta_package(raw_dir: &Path) -> PipelineResult<PackageMeta> {
    let meta_path = raw_dir.join(META_PACKAGE_FILE);
    let json = fs::read_to_string(&meta_path).map_err(|e| PipelineError::fs(&meta_path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// Copy the patched SDK unless the destination already exists.
///
/// The existence check keeps reruns from touching an SDK that an earlier
/// sub-variant or run already placed.
pub fn copy_sdk_once(source: &Path, dest: &Path) -> PipelineResult<SdkCopy> {
    if dest.exists() {
        debug!(sdk = %dest.display(), "patched SDK already in bucket");
        return Ok(SdkCopy::AlreadyPresent);
    }

    if !source.is_dir() {
        debug!(sdk = %source.display(), "no patched SDK in build output");
        return Ok(SdkCopy::NotBuilt);
    }

    copy_path(source, dest)?;
    Ok(SdkCopy::Copied)
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

//! Bucket publishing.
//!
//! The registry descriptor is copied into the bucket root and handed to the
//! registry client, which either creates a tagged revision or builds a local
//! archive.

use crate::fs::{copy_path, ensure_dir};
use farbucket_core::{BucketContext, PipelineError, PipelineResult, RegistryClient};
use std::path::PathBuf;
use tracing::info;

/// How the bucket left the machine (or didn't).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A registry revision was created and tagged with this version.
    Uploaded { version: String },
    /// A local archive was built instead.
    LocalArchive { path: PathBuf },
}

/// Publish the bucket in `ctx`.
///
/// Uploading requires `version`; its absence is a configuration error
/// raised before the bucket or registry is touched. Uploads only happen on
/// Linux hosts. Elsewhere an upload request quietly builds the local archive.
pub fn publish(
    ctx: &BucketContext,
    registry: &mut dyn RegistryClient,
    version: Option<&str>,
    upload: bool,
) -> PipelineResult<PublishOutcome> {
    let version = version.map(str::trim).filter(|v| !v.is_empty());
    if upload && version.is_none() {
        return Err(PipelineError::Configuration(
            "--upload requires --engine-version to be specified".to_string(),
        ));
    }

    ensure_dir(&ctx.bucket_root)?;
    let descriptor = ctx.bucket_descriptor();
    copy_path(&ctx.descriptor_template, &descriptor)?;

    match version {
        Some(version) if upload && ctx.host.can_upload() => {
            info!(version, descriptor = %descriptor.display(), "publishing registry revision");
            registry.publish_revision(&descriptor, version)?;
            Ok(PublishOutcome::Uploaded {
                version: version.to_string(),
            })
        }
        _ => {
            if upload {
                info!(host = ?ctx.host, "uploads only run on Linux hosts, building local archive");
            }
            let archive = ctx.local_archive();
            info!(archive = %archive.display(), "building local archive");
            registry.build_local_archive(&descriptor, &archive)?;
            Ok(PublishOutcome::LocalArchive { path: archive })
        }
    }
}

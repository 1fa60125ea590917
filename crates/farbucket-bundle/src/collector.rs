//! Optional artifact collection.
//!
//! Snapshot and tester binaries land in a host-toolchain subdirectory of the
//! build output (`clang_x64/`, `clang_arm64/`, ...) that depends on the build
//! machine, so they are located by file name with a recursive search instead
//! of a fixed relative path.

use crate::fs::copy_file;
use farbucket_core::{ArtifactSpec, PipelineResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Outcome of one collection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Destination paths written.
    pub copied: Vec<PathBuf>,
    /// Search names with no match in the source tree.
    pub missing: Vec<String>,
}

impl CollectReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: CollectReport) {
        self.copied.extend(other.copied);
        self.missing.extend(other.missing);
    }
}

/// Copy every artifact found under `source_root` to `dest_root/<dest_name>`.
///
/// Artifacts that cannot be found are skipped; that is the normal case for
/// modes that do not produce a given binary. Lookups are independent, so a
/// traversal error while searching for one artifact only affects that one.
/// If a name matches several files, the first in traversal order is used and
/// the ambiguity is logged as a warning.
///
/// A file that was found but cannot be copied is an error.
pub fn collect_optional_artifacts(
    source_root: &Path,
    dest_root: &Path,
    artifacts: &[ArtifactSpec],
) -> PipelineResult<CollectReport> {
    let mut report = CollectReport::default();

    for artifact in artifacts {
        let matches = find_files(artifact.search_name, source_root);

        let Some(found) = matches.first() else {
            debug!(
                artifact = artifact.search_name,
                source = %source_root.display(),
                "optional artifact not found, skipping"
            );
            report.missing.push(artifact.search_name.to_string());
            continue;
        };

        if matches.len() > 1 {
            let candidates: Vec<String> = matches.iter().map(|p| p.display().to_string()).collect();
            warn!(
                artifact = artifact.search_name,
                chosen = %found.display(),
                candidates = ?candidates,
                "artifact name is ambiguous, using first match"
            );
        }

        let dest = dest_root.join(artifact.dest_name);
        copy_file(found, &dest)?;
        debug!(from = %found.display(), to = %dest.display(), "collected artifact");
        report.copied.push(dest);
    }

    Ok(report)
}

/// All files named `name` below `root`, shallowest first.
///
/// Within a directory, files are visited before subdirectories, so a match
/// in a parent directory always precedes one nested below it. Symlinks to
/// files count as files. Unreadable entries (including a missing root) are
/// skipped.
pub fn find_files(name: &str, root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry during artifact search");
                None
            }
        })
        .filter(|entry| entry.file_name() == name && is_file_or_file_link(entry))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_file_or_file_link(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
#[path = "collector/collector_tests.rs"]
mod collector_tests;

//! File system helpers for writing into the bucket.
//!
//! Every failure is reported as [`PipelineError::FileSystem`] carrying the path
//! that could not be handled.

use farbucket_core::{PipelineError, PipelineResult};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Remove a file, symlink, or directory tree. Missing paths are fine.
pub fn remove_path_if_exists(path: &Path) -> PipelineResult<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(PipelineError::fs(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| PipelineError::fs(path, e))
}

/// Create `dir` and all of its parents.
pub fn ensure_dir(dir: &Path) -> PipelineResult<()> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::fs(dir, e))
}

/// Copy a single file to `dest`, creating parent directories.
pub fn copy_file(source: &Path, dest: &Path) -> PipelineResult<()> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, dest).map_err(|e| PipelineError::fs(source, e))?;
    Ok(())
}

/// Copy a file or a whole directory tree to `dest`.
///
/// Directory copies preserve the relative layout below `source`. Symlinks
/// are followed.
pub fn copy_path(source: &Path, dest: &Path) -> PipelineResult<()> {
    let metadata = fs::metadata(source).map_err(|e| PipelineError::fs(source, e))?;
    if !metadata.is_dir() {
        return copy_file(source, dest);
    }

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            PipelineError::fs(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| PipelineError::fs(entry.path(), std::io::Error::other(e.to_string())))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

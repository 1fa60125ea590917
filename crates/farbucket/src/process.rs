//! Process-backed collaborators.
//!
//! Each tool runs with the source root as its working directory and inherits
//! stdio, so its own diagnostics reach the terminal unchanged.

use farbucket_bundle::read_meta_package;
use farbucket_core::layout;
use farbucket_core::{
    BuildRunner, PackageSigner, PipelineConfig, PipelineError, PipelineResult, RegistryClient,
    ToolStatus,
};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Run `command` to completion and map a failure onto [`ToolStatus`].
pub fn run_checked(tool: &str, command: &mut Command) -> PipelineResult<()> {
    debug!(tool, command = ?command, "running");
    let status = command
        .status()
        .map_err(|e| PipelineError::tool(tool, ToolStatus::Spawn(e.to_string())))?;

    if status.success() {
        return Ok(());
    }

    let status = match status.code() {
        Some(code) => ToolStatus::Exited(code),
        None => ToolStatus::Terminated,
    };
    Err(PipelineError::tool(tool, status))
}

/// `gn` to generate a variant's output directory, then `ninja` to build it.
#[derive(Debug, Clone)]
pub struct GnNinjaRunner {
    gn: PathBuf,
    ninja: PathBuf,
    src_root: PathBuf,
}

impl GnNinjaRunner {
    pub fn new(
        gn: impl Into<PathBuf>,
        ninja: impl Into<PathBuf>,
        src_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            gn: gn.into(),
            ninja: ninja.into(),
            src_root: src_root.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.resolve_command(&config.tools.gn),
            config.resolve_command(&config.tools.ninja),
            &config.paths.src_root,
        )
    }
}

impl BuildRunner for GnNinjaRunner {
    fn run_build_variant(
        &mut self,
        variant_dir: &Path,
        flags: &[String],
        targets: &[String],
    ) -> PipelineResult<()> {
        info!(variant_dir = %variant_dir.display(), flags = %flags.join(","), "running gn");
        run_checked(
            "gn",
            Command::new(&self.gn).args(flags).current_dir(&self.src_root),
        )?;

        if !variant_dir.is_dir() {
            return Err(PipelineError::tool(
                "gn",
                ToolStatus::MissingOutput(variant_dir.to_path_buf()),
            ));
        }

        run_checked(
            "ninja",
            Command::new(&self.ninja)
                .arg("-C")
                .arg(variant_dir)
                .args(targets)
                .current_dir(&self.src_root),
        )
    }
}

/// Far packaging with `pm`.
#[derive(Debug, Clone)]
pub struct PmSigner {
    pm: PathBuf,
    src_root: PathBuf,
}

impl PmSigner {
    pub fn new(pm: impl Into<PathBuf>, src_root: impl Into<PathBuf>) -> Self {
        Self {
            pm: pm.into(),
            src_root: src_root.into(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.resolve_command(&config.tools.pm), &config.paths.src_root)
    }

    fn pm(
        &self,
        manifest: &Path,
        signing_key: &Path,
        output_dir: &Path,
        step: &str,
    ) -> PipelineResult<()> {
        run_checked(
            "pm",
            Command::new(&self.pm)
                .arg("-m")
                .arg(manifest)
                .arg("-k")
                .arg(signing_key)
                .arg("-o")
                .arg(output_dir)
                .arg(step)
                .current_dir(&self.src_root),
        )
    }
}

impl PackageSigner for PmSigner {
    fn sign_and_package(
        &mut self,
        raw_dir: &Path,
        signing_key: &Path,
        output_dir: &Path,
    ) -> PipelineResult<PathBuf> {
        let meta = read_meta_package(raw_dir)?;
        let manifest = write_package_manifest(raw_dir)?;

        self.pm(&manifest, signing_key, output_dir, "build")?;
        self.pm(&manifest, signing_key, output_dir, "archive")?;

        Ok(output_dir.join(layout::package_file_name(&meta.name)))
    }
}

/// Write `<raw_dir>.manifest` mapping each file's package path to its
/// location on disk, one `relative=absolute` line per file in sorted order.
pub fn write_package_manifest(raw_dir: &Path) -> PipelineResult<PathBuf> {
    let mut lines = String::new();
    for entry in WalkDir::new(raw_dir).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
        let entry = entry.map_err(|e| PipelineError::fs(raw_dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(raw_dir).unwrap_or(entry.path());
        lines.push_str(&format!(
            "{}={}\n",
            relative.display(),
            entry.path().display()
        ));
    }

    let mut manifest = OsString::from(raw_dir.as_os_str());
    manifest.push(".manifest");
    let manifest = PathBuf::from(manifest);
    fs::write(&manifest, lines).map_err(|e| PipelineError::fs(&manifest, e))?;

    Ok(manifest)
}

/// Registry access through the `cipd` client.
#[derive(Debug, Clone)]
pub struct CipdClient {
    cipd: PathBuf,
}

impl CipdClient {
    pub fn new(cipd: impl Into<PathBuf>) -> Self {
        Self { cipd: cipd.into() }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.resolve_command(&config.tools.cipd))
    }

    fn command(&self, descriptor: &Path) -> (Command, OsString) {
        let mut command = Command::new(&self.cipd);
        if let Some(dir) = descriptor.parent() {
            command.current_dir(dir);
        }
        let file_name = descriptor
            .file_name()
            .map_or_else(|| descriptor.as_os_str().to_owned(), |name| name.to_owned());
        (command, file_name)
    }
}

impl RegistryClient for CipdClient {
    fn publish_revision(&mut self, descriptor: &Path, version: &str) -> PipelineResult<()> {
        let (mut command, pkg_def) = self.command(descriptor);
        run_checked(
            "cipd",
            command
                .arg("create")
                .arg("-pkg-def")
                .arg(pkg_def)
                .args(["-ref", "latest", "-tag"])
                .arg(format!("git_revision:{version}")),
        )
    }

    fn build_local_archive(&mut self, descriptor: &Path, output: &Path) -> PipelineResult<()> {
        let (mut command, pkg_def) = self.command(descriptor);
        run_checked(
            "cipd",
            command
                .arg("pkg-build")
                .arg("-pkg-def")
                .arg(pkg_def)
                .arg("-out")
                .arg(output),
        )
    }
}

#[cfg(test)]
#[path = "process/process_tests.rs"]
mod process_tests;

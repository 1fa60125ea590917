//! Command-line arguments

use clap::{Parser, ValueEnum};
use farbucket::{Arch, ArchFilter, ModeFilter, PlanRequest, RunOptions, RuntimeMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "farbucket")]
#[command(author, version, about = "Build and publish the far package bucket", long_about = None)]
pub struct Cli {
    /// Publish the bucket to the registry with ref "latest"
    #[arg(long)]
    pub upload: bool,

    /// Engine version used as the registry tag (required with --upload)
    #[arg(long)]
    pub engine_version: Option<String>,

    /// Runtime mode to build
    #[arg(long, value_enum, default_value_t = ModeArg::All)]
    pub runtime_mode: ModeArg,

    /// Architectures to build
    #[arg(long, value_enum, default_value_t = ArchArg::All)]
    pub archs: ArchArg,

    /// Build without LTO (LTO is always disabled for bucket builds)
    #[arg(long)]
    pub no_lto: bool,

    /// Skip the build step and package existing outputs
    #[arg(long)]
    pub skip_build: bool,

    /// Print the resolved plan and exit without touching disk
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file (default: farbucket.toml in the source root, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Engine source root (overrides the configuration)
    #[arg(long)]
    pub src_root: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    Debug,
    Profile,
    Release,
    All,
}

impl From<ModeArg> for ModeFilter {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Debug => ModeFilter::Only(RuntimeMode::Debug),
            ModeArg::Profile => ModeFilter::Only(RuntimeMode::Profile),
            ModeArg::Release => ModeFilter::Only(RuntimeMode::Release),
            ModeArg::All => ModeFilter::All,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchArg {
    X64,
    Arm64,
    All,
}

impl From<ArchArg> for ArchFilter {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::X64 => ArchFilter::Only(Arch::X64),
            ArchArg::Arm64 => ArchFilter::Only(Arch::Arm64),
            ArchArg::All => ArchFilter::All,
        }
    }
}

impl Cli {
    /// Run options selected by the flags.
    ///
    /// `--no-lto` is the default behavior, so LTO is only "requested" when
    /// the flag is absent; the planner overrides it either way.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            request: PlanRequest {
                archs: self.archs.into(),
                modes: self.runtime_mode.into(),
                skip_build: self.skip_build,
                enable_lto: !self.no_lto,
            },
            upload: self.upload,
            engine_version: self.engine_version.clone(),
        }
    }
}

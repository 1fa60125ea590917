//! Pipeline configuration and the bucket context threaded through every step

use crate::error::{PipelineError, PipelineResult};
use crate::layout;
use crate::variant::{BuildVariant, ExecMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "farbucket.toml";

/// File name of the registry descriptor inside the bucket.
pub const DESCRIPTOR_FILE: &str = "fuchsia.cipd.yaml";

/// File name of the locally built archive inside the bucket.
pub const LOCAL_ARCHIVE_FILE: &str = "fuchsia.cipd";

/// Host operating system class.
///
/// Selects the packaging tool binary and gates registry uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostOs {
    Linux,
    Mac,
    Windows,
}

impl HostOs {
    /// Detect the host at runtime. Anything that is not Linux or macOS is
    /// treated as Windows.
    #[must_use]
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Self::Linux,
            "macos" => Self::Mac,
            _ => Self::Windows,
        }
    }

    /// Directory name the SDK uses for this host's tools.
    #[must_use]
    pub fn sdk_dir(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Mac => "mac",
            Self::Windows => "windows",
        }
    }

    /// Registry uploads only run on Linux hosts.
    #[must_use]
    pub fn can_upload(&self) -> bool {
        matches!(self, Self::Linux)
    }
}

/// Top-level pipeline configuration, usually read from `farbucket.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub tools: ToolsConfig,
    pub build: BuildConfig,
}

/// Filesystem locations. Relative paths resolve against `src_root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Checkout root; every tool runs with this as its working directory
    pub src_root: PathBuf,

    /// Directory holding the per-variant build outputs
    pub out_dir: PathBuf,

    /// Staging bucket root
    pub bucket_dir: PathBuf,

    /// Key used to sign far packages
    pub signing_key: PathBuf,

    /// Registry descriptor copied into the bucket before publishing
    pub descriptor_template: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            src_root: PathBuf::from("."),
            out_dir: PathBuf::from("out"),
            bucket_dir: PathBuf::from("out/fuchsia_bucket"),
            signing_key: PathBuf::from("flutter/tools/fuchsia/development.key"),
            descriptor_template: PathBuf::from("flutter/tools/fuchsia").join(DESCRIPTOR_FILE),
        }
    }
}

/// External tool commands.
///
/// A value containing a path separator resolves against `src_root`; a bare
/// name is looked up on `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub gn: String,
    pub ninja: String,
    pub pm: String,
    pub cipd: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            gn: "flutter/tools/gn".to_string(),
            ninja: "autoninja".to_string(),
            pm: default_pm(HostOs::current()),
            cipd: "cipd".to_string(),
        }
    }
}

fn default_pm(host: HostOs) -> String {
    format!("fuchsia/sdk/{}/tools/pm", host.sdk_dir())
}

/// Build executor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Targets handed to the executor for every variant
    pub targets: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            targets: vec![format!("{}:fuchsia", layout::FUCHSIA_BASE)],
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PipelineError::fs(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `farbucket.toml` in
    /// `src_root` is used when present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>, src_root: &Path) -> PipelineResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = src_root.join(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> PipelineResult<()> {
        let tools = [
            ("gn", &self.tools.gn),
            ("ninja", &self.tools.ninja),
            ("pm", &self.tools.pm),
            ("cipd", &self.tools.cipd),
        ];
        for (name, command) in tools {
            if command.trim().is_empty() {
                return Err(PipelineError::Configuration(format!(
                    "tools.{name} cannot be empty"
                )));
            }
        }

        if self.build.targets.is_empty() {
            return Err(PipelineError::Configuration(
                "build.targets must name at least one target".to_string(),
            ));
        }

        if self.build.targets.iter().any(|t| t.trim().is_empty()) {
            return Err(PipelineError::Configuration(
                "build.targets cannot contain an empty target".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve a path setting against the source root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.paths.src_root.join(path)
        }
    }

    /// Resolve a tool command: paths resolve against the source root, bare
    /// names are left for `PATH` lookup.
    pub fn resolve_command(&self, command: &str) -> PathBuf {
        if command.contains('/') || command.contains('\\') {
            self.resolve_path(Path::new(command))
        } else {
            PathBuf::from(command)
        }
    }
}

/// Locations shared by every step of a run.
///
/// Passed explicitly to each component so tests can point the whole pipeline
/// at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketContext {
    /// Working directory for external tools
    pub src_root: PathBuf,
    /// Parent of every variant output directory
    pub out_dir: PathBuf,
    /// Staging bucket root
    pub bucket_root: PathBuf,
    /// Package signing key
    pub signing_key: PathBuf,
    /// Registry descriptor template
    pub descriptor_template: PathBuf,
    /// Host class, used to gate uploads
    pub host: HostOs,
}

impl BucketContext {
    /// Resolve a context from configuration
    pub fn from_config(config: &PipelineConfig, host: HostOs) -> Self {
        Self {
            src_root: config.paths.src_root.clone(),
            out_dir: config.resolve_path(&config.paths.out_dir),
            bucket_root: config.resolve_path(&config.paths.bucket_dir),
            signing_key: config.resolve_path(&config.paths.signing_key),
            descriptor_template: config.resolve_path(&config.paths.descriptor_template),
            host,
        }
    }

    /// Context rooted at `root`, laid out like a checkout: `root/out` for
    /// build outputs and `root/out/fuchsia_bucket` for the bucket.
    pub fn rooted_at(root: impl AsRef<Path>, host: HostOs) -> Self {
        let config = PipelineConfig {
            paths: PathsConfig {
                src_root: root.as_ref().to_path_buf(),
                ..PathsConfig::default()
            },
            ..PipelineConfig::default()
        };
        Self::from_config(&config, host)
    }

    /// Build output directory of a variant
    pub fn variant_output_dir(&self, variant: &BuildVariant) -> PathBuf {
        self.out_dir
            .join(layout::build_output_dir(variant.mode(), variant.arch()))
    }

    /// Bucket leaf directory for one execution mode of a variant
    pub fn bucket_leaf(&self, variant: &BuildVariant, exec: ExecMode) -> PathBuf {
        self.bucket_root
            .join(layout::bucket_leaf_dir(variant, exec))
    }

    /// Descriptor path inside the bucket
    pub fn bucket_descriptor(&self) -> PathBuf {
        self.bucket_root.join(DESCRIPTOR_FILE)
    }

    /// Local archive path inside the bucket
    pub fn local_archive(&self) -> PathBuf {
        self.bucket_root.join(LOCAL_ARCHIVE_FILE)
    }
}

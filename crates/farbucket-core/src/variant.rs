//! Build variants and the sub-variants packaged under them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target CPU architecture of a build variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    /// 64-bit x86.
    X64,
    /// 64-bit ARM.
    Arm64,
}

impl Arch {
    /// All architectures, in build order.
    pub const ALL: [Arch; 2] = [Arch::X64, Arch::Arm64];

    /// Get the architecture key (e.g., "x64"), as passed to the generator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
        }
    }

    /// Parse an architecture from its key.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x64" => Some(Self::X64),
            "arm64" => Some(Self::Arm64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engine runtime mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeMode {
    Debug,
    Profile,
    Release,
}

/// Fixed runtime-mode to product-flag table, in declaration order.
///
/// Release is the only product mode.
pub const PRODUCT_MODES: [(RuntimeMode, bool); 3] = [
    (RuntimeMode::Debug, false),
    (RuntimeMode::Profile, false),
    (RuntimeMode::Release, true),
];

impl RuntimeMode {
    /// All runtime modes, in build order.
    pub const ALL: [RuntimeMode; 3] = [
        RuntimeMode::Debug,
        RuntimeMode::Profile,
        RuntimeMode::Release,
    ];

    /// Get the mode key (e.g., "debug").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Profile => "profile",
            Self::Release => "release",
        }
    }

    /// Parse a runtime mode from its key.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debug" => Some(Self::Debug),
            "profile" => Some(Self::Profile),
            "release" => Some(Self::Release),
            _ => None,
        }
    }

    /// Whether builds in this mode are product builds, per [`PRODUCT_MODES`].
    #[must_use]
    pub fn is_product(&self) -> bool {
        PRODUCT_MODES
            .iter()
            .find(|(mode, _)| mode == self)
            .is_some_and(|(_, product)| *product)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which runner a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerKind {
    /// The engine runner (`flutter_*_runner`).
    Flutter,
    /// The interpreter runner (`dart_*_runner`).
    Dart,
}

impl RunnerKind {
    /// Packaging order within a variant.
    pub const ALL: [RunnerKind; 2] = [RunnerKind::Flutter, RunnerKind::Dart];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flutter => "flutter",
            Self::Dart => "dart",
        }
    }
}

impl fmt::Display for RunnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot execution mode of a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    Jit,
    Aot,
}

impl ExecMode {
    /// Packaging order within a runner kind.
    pub const ALL: [ExecMode; 2] = [ExecMode::Jit, ExecMode::Aot];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jit => "jit",
            Self::Aot => "aot",
        }
    }
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (architecture, runtime mode) build configuration.
///
/// The product flag is derived from the mode when the variant is created and
/// cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildVariant {
    arch: Arch,
    mode: RuntimeMode,
    is_product: bool,
}

impl BuildVariant {
    #[must_use]
    pub fn new(arch: Arch, mode: RuntimeMode) -> Self {
        Self {
            arch,
            mode,
            is_product: mode.is_product(),
        }
    }

    #[must_use]
    pub fn arch(&self) -> Arch {
        self.arch
    }

    #[must_use]
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    #[must_use]
    pub fn is_product(&self) -> bool {
        self.is_product
    }

    /// The four packaging units of this variant: each runner kind in jit then aot.
    #[must_use]
    pub fn sub_variants(&self) -> Vec<SubVariant> {
        RunnerKind::ALL
            .iter()
            .flat_map(|kind| {
                ExecMode::ALL.iter().map(move |exec| SubVariant {
                    kind: *kind,
                    exec: *exec,
                    is_product: self.is_product,
                })
            })
            .collect()
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.arch, self.mode)?;
        if self.is_product {
            write!(f, " (product)")?;
        }
        Ok(())
    }
}

/// One (runner kind, execution mode) packaging unit nested under a [`BuildVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubVariant {
    pub kind: RunnerKind,
    pub exec: ExecMode,
    /// Inherited from the parent variant.
    pub is_product: bool,
}

/// Architecture selection requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchFilter {
    #[default]
    All,
    Only(Arch),
}

impl ArchFilter {
    /// Architectures selected by this filter, in build order.
    #[must_use]
    pub fn archs(&self) -> Vec<Arch> {
        match self {
            Self::All => Arch::ALL.to_vec(),
            Self::Only(arch) => vec![*arch],
        }
    }
}

/// Runtime-mode selection requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    All,
    Only(RuntimeMode),
}

impl ModeFilter {
    #[must_use]
    pub fn matches(&self, mode: RuntimeMode) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == mode,
        }
    }
}

//! Canonical names for build outputs and the bucket tree.
//!
//! Everything here is pure. The bucket layout is consumed by downstream
//! deployment tooling, so these strings are part of the external contract:
//!
//! ```text
//! fuchsia_bucket/
//! ├── fuchsia.cipd.yaml
//! └── flutter/
//!     └── x64/
//!         └── debug/
//!             ├── jit/
//!             │   ├── flutter_jit_runner-0.far
//!             │   ├── dart_jit_runner-0.far
//!             │   ├── flutter_runner_patched_sdk/
//!             │   ├── dart_runner_patched_sdk/
//!             │   ├── dart_binaries/
//!             │   │   ├── gen_snapshot
//!             │   │   └── kernel_compiler.snapshot
//!             │   └── flutter_binaries/
//!             │       └── flutter_tester
//!             └── aot/
//!                 └── ...
//! ```

use crate::variant::{Arch, BuildVariant, ExecMode, RunnerKind, RuntimeMode, SubVariant};

/// Root of the runner sources in the generator's label namespace.
pub const FUCHSIA_BASE: &str = "flutter/shell/platform/fuchsia";

/// Top-level directory of the bucket tree.
pub const BUCKET_PREFIX: &str = "flutter";

/// Version suffix the packaging tool appends to archive names.
pub const PACKAGE_VERSION: &str = "0";

/// Output directory name for a (mode, arch) pair, relative to the out dir.
///
/// # Example
///
/// ```
/// use farbucket_core::{Arch, RuntimeMode, layout};
///
/// assert_eq!(layout::build_output_dir(RuntimeMode::Debug, Arch::X64), "fuchsia_debug_x64");
/// ```
#[must_use]
pub fn build_output_dir(mode: RuntimeMode, arch: Arch) -> String {
    format!("fuchsia_{}_{}", mode.as_str(), arch.as_str())
}

/// Bucket-relative directory holding everything for an (arch, mode) pair.
#[must_use]
pub fn bucket_dest_dir(arch: Arch, mode: RuntimeMode) -> String {
    format!("{BUCKET_PREFIX}/{}/{}", arch.as_str(), mode.as_str())
}

/// Bucket-relative leaf directory for one execution mode of a variant.
#[must_use]
pub fn bucket_leaf_dir(variant: &BuildVariant, exec: ExecMode) -> String {
    format!(
        "{}/{}",
        bucket_dest_dir(variant.arch(), variant.mode()),
        exec.as_str()
    )
}

/// Runner identity, e.g. `flutter_aot_product_runner`.
///
/// Used both as the build target name and as the package name, so it is
/// distinct for every (kind, exec, product) combination.
#[must_use]
pub fn runner_name(kind: RunnerKind, exec: ExecMode, is_product: bool) -> String {
    let product_suffix = if is_product { "_product" } else { "" };
    format!("{}_{}{}_runner", kind.as_str(), exec.as_str(), product_suffix)
}

/// Runner name for a sub-variant.
#[must_use]
pub fn sub_variant_runner_name(sub: &SubVariant) -> String {
    runner_name(sub.kind, sub.exec, sub.is_product)
}

/// Raw package directory the build writes for a runner.
#[must_use]
pub fn far_dir_name(runner: &str) -> String {
    format!("{runner}_far")
}

/// Signed archive the packaging tool produces for a runner.
#[must_use]
pub fn package_file_name(runner: &str) -> String {
    format!("{runner}-{PACKAGE_VERSION}.far")
}

/// Patched SDK directory accompanying every runner of a kind.
#[must_use]
pub fn patched_sdk_dir_name(kind: RunnerKind) -> String {
    format!("{}_runner_patched_sdk", kind.as_str())
}

/// Generator label of a runner target, e.g.
/// `flutter/shell/platform/fuchsia/dart:dart_jit_runner`.
#[must_use]
pub fn runner_target(sub: &SubVariant) -> String {
    format!(
        "{FUCHSIA_BASE}/{}:{}",
        sub.kind.as_str(),
        sub_variant_runner_name(sub)
    )
}

/// An optional artifact: the file name searched for in the build output and
/// its path relative to the bucket leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    pub search_name: &'static str,
    pub dest_name: &'static str,
}

/// Snapshot and compiler binaries copied next to every package.
pub const DART_BINARIES: [ArtifactSpec; 4] = [
    ArtifactSpec {
        search_name: "gen_snapshot",
        dest_name: "dart_binaries/gen_snapshot",
    },
    ArtifactSpec {
        search_name: "gen_snapshot_product",
        dest_name: "dart_binaries/gen_snapshot_product",
    },
    ArtifactSpec {
        search_name: "kernel_compiler.dart.snapshot",
        dest_name: "dart_binaries/kernel_compiler.snapshot",
    },
    ArtifactSpec {
        search_name: "frontend_server.dart.snapshot",
        dest_name: "dart_binaries/flutter_frontend_server.snapshot",
    },
];

/// Host test runner binary.
pub const FLUTTER_BINARIES: [ArtifactSpec; 1] = [ArtifactSpec {
    search_name: "flutter_tester",
    dest_name: "flutter_binaries/flutter_tester",
}];

/// Optional artifacts contributed by a sub-variant.
///
/// The set is the same for every sub-variant; modes that do not produce a
/// given binary simply have nothing to collect.
#[must_use]
pub fn optional_artifacts(_sub: &SubVariant) -> Vec<ArtifactSpec> {
    DART_BINARIES
        .iter()
        .chain(FLUTTER_BINARIES.iter())
        .copied()
        .collect()
}

#![allow(non_snake_case)]

use super::*;
use farbucket_core::{Arch, ArchFilter, HostOs, ModeFilter, RuntimeMode, ToolStatus, layout};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct NoopBuilder;

impl BuildRunner for NoopBuilder {
    fn run_build_variant(&mut self, _: &Path, _: &[String], _: &[String]) -> PipelineResult<()> {
        Ok(())
    }
}

struct FileSigner;

impl PackageSigner for FileSigner {
    fn sign_and_package(
        &mut self,
        raw_dir: &Path,
        _: &Path,
        output_dir: &Path,
    ) -> PipelineResult<PathBuf> {
        let name = raw_dir.file_name().unwrap().to_string_lossy().to_string();
        let path = output_dir.join(layout::package_file_name(name.trim_end_matches("_far")));
        fs::write(&path, b"far").unwrap();
        Ok(path)
    }
}

struct BrokenRegistry;

impl RegistryClient for BrokenRegistry {
    fn publish_revision(&mut self, _: &Path, _: &str) -> PipelineResult<()> {
        Err(PipelineError::tool("cipd", ToolStatus::Exited(2)))
    }

    fn build_local_archive(&mut self, _: &Path, _: &Path) -> PipelineResult<()> {
        Err(PipelineError::tool("cipd", ToolStatus::Exited(4)))
    }
}

fn context(temp: &TempDir) -> BucketContext {
    let ctx = BucketContext::rooted_at(temp.path(), HostOs::Linux);
    fs::create_dir_all(ctx.descriptor_template.parent().unwrap()).unwrap();
    fs::write(&ctx.descriptor_template, "package: flutter/fuchsia\n").unwrap();
    ctx
}

fn single_variant(upload: bool, engine_version: Option<&str>) -> RunOptions {
    RunOptions {
        request: PlanRequest {
            archs: ArchFilter::Only(Arch::X64),
            modes: ModeFilter::Only(RuntimeMode::Debug),
            skip_build: true,
            enable_lto: false,
        },
        upload,
        engine_version: engine_version.map(str::to_string),
    }
}

#[test]
fn run___registry_failure___propagates_tool_error() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    let err = run(
        &single_variant(false, None),
        &ctx,
        &[],
        Toolset {
            builder: &mut NoopBuilder,
            signer: &mut FileSigner,
            registry: &mut BrokenRegistry,
        },
    )
    .unwrap_err();

    assert_eq!(err.exit_code(), 4);
}

#[test]
fn run___upload_without_version___exits_one_with_full_summary() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);

    let outcome = run(
        &single_variant(true, None),
        &ctx,
        &[],
        Toolset {
            builder: &mut NoopBuilder,
            signer: &mut FileSigner,
            registry: &mut BrokenRegistry,
        },
    )
    .unwrap();

    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.summary.packages_assembled(), 4);
    assert_eq!(outcome.summary.publish, None);
}

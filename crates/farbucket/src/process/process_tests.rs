#![allow(non_snake_case)]

use super::*;
use farbucket_bundle::write_meta_package;
use tempfile::TempDir;

#[test]
fn run_checked___missing_binary___is_spawn_failure() {
    let err = run_checked(
        "gn",
        &mut Command::new("/nonexistent/farbucket-test-tool"),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::ExternalTool {
            status: ToolStatus::Spawn(_),
            ..
        }
    ));
    assert_eq!(err.exit_code(), 1);
}

#[cfg(unix)]
#[test]
fn run_checked___nonzero_exit___carries_exit_code() {
    let err = run_checked("ninja", Command::new("sh").args(["-c", "exit 5"])).unwrap_err();

    assert_eq!(err.exit_code(), 5);
    assert_eq!(err.to_string(), "ninja failed: exit status 5");
}

#[cfg(unix)]
#[test]
fn run_checked___success___is_ok() {
    assert!(run_checked("true", &mut Command::new("true")).is_ok());
}

#[cfg(unix)]
#[test]
fn GnNinjaRunner___generator_without_output___is_missing_output() {
    let temp = TempDir::new().unwrap();
    let variant_dir = temp.path().join("out/fuchsia_debug_x64");
    let mut runner = GnNinjaRunner::new("true", "false", temp.path());

    let err = runner
        .run_build_variant(&variant_dir, &["--fuchsia".to_string()], &[])
        .unwrap_err();

    match err {
        PipelineError::ExternalTool { tool, status } => {
            assert_eq!(tool, "gn");
            assert_eq!(status, ToolStatus::MissingOutput(variant_dir));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn GnNinjaRunner___executor_failure___reports_ninja() {
    let temp = TempDir::new().unwrap();
    let variant_dir = temp.path().join("out/fuchsia_debug_x64");
    std::fs::create_dir_all(&variant_dir).unwrap();
    let mut runner = GnNinjaRunner::new("true", "false", temp.path());

    let err = runner.run_build_variant(&variant_dir, &[], &[]).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::ExternalTool { ref tool, status: ToolStatus::Exited(1) } if tool == "ninja"
    ));
}

#[test]
fn write_package_manifest___lists_files_sorted() {
    let temp = TempDir::new().unwrap();
    let raw_dir = temp.path().join("dart_jit_runner_far");
    write_meta_package(&raw_dir, "dart_jit_runner").unwrap();
    std::fs::create_dir_all(raw_dir.join("bin")).unwrap();
    std::fs::write(raw_dir.join("bin/app"), b"app").unwrap();

    let manifest = write_package_manifest(&raw_dir).unwrap();

    assert_eq!(manifest, temp.path().join("dart_jit_runner_far.manifest"));
    let contents = std::fs::read_to_string(&manifest).unwrap();
    let expected = format!(
        "{}={}\n{}={}\n",
        Path::new("bin/app").display(),
        raw_dir.join("bin/app").display(),
        Path::new("meta/package").display(),
        raw_dir.join("meta/package").display(),
    );
    assert_eq!(contents, expected);
}

#[test]
fn PmSigner___raw_dir_without_meta___is_file_system_error() {
    let temp = TempDir::new().unwrap();
    let raw_dir = temp.path().join("flutter_jit_runner_far");
    std::fs::create_dir_all(&raw_dir).unwrap();
    let mut signer = PmSigner::new("pm", temp.path());

    let err = signer
        .sign_and_package(&raw_dir, Path::new("key"), temp.path())
        .unwrap_err();

    assert!(matches!(err, PipelineError::FileSystem { .. }));
}

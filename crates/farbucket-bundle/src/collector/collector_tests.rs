#![allow(non_snake_case)]

use super::*;
use farbucket_core::layout::{DART_BINARIES, FLUTTER_BINARIES};
use std::fs;
use tempfile::TempDir;

fn all_artifacts() -> Vec<ArtifactSpec> {
    DART_BINARIES
        .iter()
        .chain(FLUTTER_BINARIES.iter())
        .copied()
        .collect()
}

fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn collect_optional_artifacts___no_targets_present___copies_nothing() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out/fuchsia_debug_x64");
    write(&source.join("obj/unrelated.o"), b"obj");
    let dest = temp.path().join("bucket");

    let report = collect_optional_artifacts(&source, &dest, &all_artifacts()).unwrap();

    assert!(report.copied.is_empty());
    assert_eq!(report.missing.len(), 5);
    assert!(!dest.exists());
}

#[test]
fn collect_optional_artifacts___missing_source_root___is_not_an_error() {
    let temp = TempDir::new().unwrap();

    let report = collect_optional_artifacts(
        &temp.path().join("never_built"),
        &temp.path().join("bucket"),
        &all_artifacts(),
    )
    .unwrap();

    assert!(report.copied.is_empty());
}

#[test]
fn collect_optional_artifacts___one_target_present___copies_only_that_one() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(
        &source.join("clang_x64/gen/kernel_compiler.dart.snapshot"),
        b"snapshot",
    );
    let dest = temp.path().join("leaf");

    let report = collect_optional_artifacts(&source, &dest, &all_artifacts()).unwrap();

    let expected = dest.join("dart_binaries/kernel_compiler.snapshot");
    assert_eq!(report.copied, vec![expected.clone()]);
    assert_eq!(fs::read(expected).unwrap(), b"snapshot");
    assert_eq!(report.missing.len(), 4);
}

#[test]
fn collect_optional_artifacts___renames_to_destination_name() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(&source.join("frontend_server.dart.snapshot"), b"fs");
    let dest = temp.path().join("leaf");

    collect_optional_artifacts(&source, &dest, &all_artifacts()).unwrap();

    assert!(
        dest.join("dart_binaries/flutter_frontend_server.snapshot")
            .is_file()
    );
    assert!(!dest.join("frontend_server.dart.snapshot").exists());
}

#[test]
fn collect_optional_artifacts___searches_unbounded_depth() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(&source.join("a/b/c/d/e/f/flutter_tester"), b"tester");
    let dest = temp.path().join("leaf");

    let report = collect_optional_artifacts(&source, &dest, &FLUTTER_BINARIES).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert!(dest.join("flutter_binaries/flutter_tester").is_file());
}

#[test]
fn collect_optional_artifacts___ambiguous_name___uses_first_sorted_match() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(&source.join("clang_arm64/gen_snapshot"), b"arm64");
    write(&source.join("clang_x64/gen_snapshot"), b"x64");
    let dest = temp.path().join("leaf");

    collect_optional_artifacts(&source, &dest, &DART_BINARIES[..1]).unwrap();

    assert_eq!(
        fs::read(dest.join("dart_binaries/gen_snapshot")).unwrap(),
        b"arm64"
    );
}

#[test]
fn collect_optional_artifacts___parent_match___beats_nested_match() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(&source.join("clang_x64/exe.unstripped/gen_snapshot"), b"unstripped");
    write(&source.join("clang_x64/gen_snapshot"), b"stripped");
    let dest = temp.path().join("leaf");

    collect_optional_artifacts(&source, &dest, &DART_BINARIES[..1]).unwrap();

    assert_eq!(
        fs::read(dest.join("dart_binaries/gen_snapshot")).unwrap(),
        b"stripped"
    );
}

#[test]
fn find_files___lists_shallower_matches_first() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("a/deep/flutter_tester"), b"deep");
    write(&temp.path().join("b/flutter_tester"), b"b");
    write(&temp.path().join("flutter_tester"), b"top");

    let found = find_files("flutter_tester", temp.path());

    assert_eq!(
        found,
        vec![
            temp.path().join("flutter_tester"),
            temp.path().join("a/deep/flutter_tester"),
            temp.path().join("b/flutter_tester"),
        ]
    );
}

#[cfg(unix)]
#[test]
fn collect_optional_artifacts___symlinked_artifact___is_copied() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    let real = temp.path().join("prebuilt/gen_snapshot.real");
    write(&real, b"linked");
    fs::create_dir_all(&source).unwrap();
    std::os::unix::fs::symlink(&real, source.join("gen_snapshot")).unwrap();
    let dest = temp.path().join("leaf");

    let report = collect_optional_artifacts(&source, &dest, &DART_BINARIES[..1]).unwrap();

    assert!(report.missing.is_empty());
    assert_eq!(
        fs::read(dest.join("dart_binaries/gen_snapshot")).unwrap(),
        b"linked"
    );
}

#[cfg(unix)]
#[test]
fn find_files___dangling_symlink___is_not_a_match() {
    let temp = TempDir::new().unwrap();
    std::os::unix::fs::symlink(temp.path().join("nowhere"), temp.path().join("gen_snapshot"))
        .unwrap();

    assert!(find_files("gen_snapshot", temp.path()).is_empty());
}

#[test]
fn collect_optional_artifacts___rerun___overwrites_idempotently() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("out");
    write(&source.join("gen_snapshot"), b"v1");
    let dest = temp.path().join("leaf");

    collect_optional_artifacts(&source, &dest, &DART_BINARIES).unwrap();
    let report = collect_optional_artifacts(&source, &dest, &DART_BINARIES).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert_eq!(fs::read(dest.join("dart_binaries/gen_snapshot")).unwrap(), b"v1");
}

#[test]
fn find_files___ignores_directories_with_matching_name() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("gen_snapshot")).unwrap();

    assert!(find_files("gen_snapshot", temp.path()).is_empty());
}

#[test]
fn CollectReport___merge___concatenates() {
    let mut a = CollectReport {
        copied: vec![PathBuf::from("a")],
        missing: vec!["x".to_string()],
    };
    let b = CollectReport {
        copied: vec![PathBuf::from("b")],
        missing: vec![],
    };

    a.merge(b);

    assert_eq!(a.copied.len(), 2);
    assert_eq!(a.missing, vec!["x".to_string()]);
}

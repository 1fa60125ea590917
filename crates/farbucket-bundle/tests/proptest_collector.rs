//! Property-based tests for optional artifact collection.

#![allow(non_snake_case)]

use farbucket_bundle::collect_optional_artifacts;
use farbucket_core::ArtifactSpec;
use farbucket_core::layout::{DART_BINARIES, FLUTTER_BINARIES};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn all_artifacts() -> Vec<ArtifactSpec> {
    DART_BINARIES
        .iter()
        .chain(FLUTTER_BINARIES.iter())
        .copied()
        .collect()
}

proptest! {
    #[test]
    fn collect___copies_exactly_the_present_artifacts(
        present in proptest::collection::vec(any::<bool>(), 5),
        depth in 0usize..4,
    ) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out");
        let dest = temp.path().join("leaf");
        let artifacts = all_artifacts();

        let mut nested = source.clone();
        for level in 0..depth {
            nested = nested.join(format!("level{level}"));
        }
        fs::create_dir_all(&nested).unwrap();

        let mut expected = BTreeSet::new();
        for (artifact, is_present) in artifacts.iter().zip(&present) {
            if *is_present {
                fs::write(nested.join(artifact.search_name), artifact.search_name).unwrap();
                expected.insert(dest.join(artifact.dest_name));
            }
        }

        let report = collect_optional_artifacts(&source, &dest, &artifacts).unwrap();

        let copied: BTreeSet<_> = report.copied.into_iter().collect();
        prop_assert_eq!(&copied, &expected);
        prop_assert_eq!(report.missing.len(), 5 - expected.len());
        for artifact in &artifacts {
            let path = dest.join(artifact.dest_name);
            prop_assert_eq!(path.exists(), expected.contains(&path));
        }
    }
}

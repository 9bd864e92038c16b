//! Manifest paths mirror the on-disk layout for arbitrary nesting

use launcher_files::tree::build_manifest;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn relative_path_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z0-9]{1,6}", 1..5)
}

#[test]
fn test_every_file_listed_once_with_slash_path() {
    let mut runner = proptest::test_runner::TestRunner::new(proptest::test_runner::Config {
        cases: 32,
        ..proptest::test_runner::Config::default()
    });

    runner
        .run(
            &proptest::collection::vec(relative_path_strategy(), 0..12),
            |layouts| {
                let temp_dir = TempDir::new().unwrap();
                let root = temp_dir.path();

                // File names get a suffix so no file path is a prefix directory of another
                let mut expected = BTreeSet::new();
                for components in &layouts {
                    let relative = format!("{}.f", components.join("/"));
                    let (dirs, _) = components.split_at(components.len() - 1);
                    let mut dir = root.to_path_buf();
                    for d in dirs {
                        dir.push(d);
                    }
                    fs::create_dir_all(&dir).unwrap();
                    fs::write(root.join(&relative), relative.as_bytes()).unwrap();
                    expected.insert(relative);
                }

                let manifest = build_manifest(root).unwrap();
                let actual: BTreeSet<String> = manifest
                    .files()
                    .iter()
                    .map(|f| f.relative_path().to_string())
                    .collect();

                prop_assert_eq!(manifest.len(), expected.len());
                prop_assert_eq!(actual, expected);
                Ok(())
            },
        )
        .unwrap();
}

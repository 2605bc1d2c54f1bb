//! Property tests for archive membership.

#![allow(non_snake_case)]

use lovepack_bundle::build_archive;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::Path;
use tempfile::TempDir;
use zip::ZipArchive;

/// Relative paths of one to four components, some of them dot-prefixed.
fn tree_paths() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("\\.?[a-d]{1,2}", 1..=4), 1..24)
}

/// Write every path that fits in the tree; conflicting ones are skipped.
fn materialize(root: &Path, paths: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut written = Vec::new();
    for components in paths {
        let path = components.iter().fold(root.to_path_buf(), |p, c| p.join(c));
        let parent_ok = fs::create_dir_all(path.parent().unwrap()).is_ok();
        if parent_ok && !path.exists() && fs::write(&path, components.join("/")).is_ok() {
            written.push(components.clone());
        }
    }
    written
}

fn archive_names(archive_path: &Path) -> BTreeSet<String> {
    let archive = ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    archive.file_names().map(str::to_string).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn build_archive___any_tree___contains_exactly_visible_files(paths in tree_paths()) {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let written = materialize(input.path(), &paths);
        let archive_path = output.path().join("tree.love");

        let summary = build_archive(input.path(), &archive_path).unwrap();

        let expected: BTreeSet<String> = written
            .iter()
            .filter(|c| !c[..c.len() - 1].iter().any(|dir| dir.starts_with('.')))
            .map(|c| c.join("/"))
            .collect();
        prop_assert_eq!(summary.entries, expected.len());
        prop_assert_eq!(archive_names(&archive_path), expected);
    }
}

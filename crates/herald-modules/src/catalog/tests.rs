//! Unit tests for path catalogs.

use std::fs;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

struct Tree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

fn touch(root: &Utf8Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(&path, "{}").expect("write file");
}

#[fixture]
fn tree() -> Tree {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    touch(&root, "config/info.json");
    touch(&root, "modules/events/ready.json");
    touch(&root, "modules/commands/ping.json");
    touch(&root, "modules/commands/admin/ban.json");
    Tree { _dir: dir, root }
}

#[rstest]
fn scan_collects_nested_files_in_sorted_order(tree: Tree) {
    let catalog = DirectoryCatalog::scan(&[tree.root.clone()]).expect("scan");
    let paths = catalog.all_paths().expect("paths present");
    let relative: Vec<String> = paths
        .iter()
        .map(|path| {
            path.full_path()
                .strip_prefix(&tree.root)
                .expect("path under root")
                .to_string()
        })
        .collect();
    assert_eq!(
        relative,
        vec![
            "config/info.json",
            "modules/commands/admin/ban.json",
            "modules/commands/ping.json",
            "modules/events/ready.json",
        ]
    );
}

#[rstest]
fn find_by_name_matches_file_stem(tree: Tree) {
    let catalog = DirectoryCatalog::scan(&[tree.root.clone()]).expect("scan");
    let info = catalog.find_by_name("info").expect("info present");
    assert_eq!(info.full_path(), tree.root.join("config/info.json"));
    assert!(catalog.find_by_name("style").is_none());
}

#[rstest]
fn find_by_name_prefers_the_shallowest_match(tree: Tree) {
    touch(&tree.root, "commands/info.json");
    touch(&tree.root, "info.json");
    let catalog = DirectoryCatalog::scan(&[tree.root.clone()]).expect("scan");
    let info = catalog.find_by_name("info").expect("info present");
    assert_eq!(info.full_path(), tree.root.join("info.json"));
}

#[test]
fn equally_deep_matches_resolve_in_catalog_order() {
    let catalog = DirectoryCatalog::from_paths(vec![
        ModulePath::from("bot/config/info.json"),
        ModulePath::from("bot/commands/info.json"),
    ]);
    let info = catalog.find_by_name("info").expect("info present");
    assert_eq!(info.full_path(), Utf8Path::new("bot/config/info.json"));
}

#[rstest]
fn repeated_scans_agree(tree: Tree) {
    let first = DirectoryCatalog::scan(&[tree.root.clone()]).expect("first scan");
    let second = DirectoryCatalog::scan(&[tree.root.clone()]).expect("second scan");
    assert_eq!(first.all_paths(), second.all_paths());
}

#[test]
fn missing_root_yields_no_path_set() {
    let dir = TempDir::new().expect("create temp dir");
    let missing = Utf8PathBuf::from_path_buf(dir.path().join("absent")).expect("utf-8 path");
    let catalog = DirectoryCatalog::scan(&[missing]).expect("scan");
    assert!(catalog.all_paths().is_none());
    assert!(catalog.find_by_name("info").is_none());
}

#[test]
fn empty_root_yields_empty_path_set() {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
    let catalog = DirectoryCatalog::scan(&[root]).expect("scan");
    assert_eq!(catalog.all_paths(), Some(Vec::new()));
}

#[test]
fn from_paths_preserves_given_order() {
    let catalog = DirectoryCatalog::from_paths(vec![
        ModulePath::from("b/events/z.json"),
        ModulePath::from("a/commands/a.json"),
    ]);
    let paths = catalog.all_paths().expect("paths present");
    assert_eq!(paths.first().map(ModulePath::full_path), Some(Utf8Path::new("b/events/z.json")));
}

use std::fs;

use hashguard::canonicalize_or_current;
use hashguard::commands::display_relative;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_resolves_existing_absolute_path() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).expect("create nested");

    let result = canonicalize_or_current(nested.to_str().expect("utf8")).expect("canonicalize");
    assert_eq!(result, nested.canonicalize().expect("canonicalize nested"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path_onto_cwd() {
    let result = canonicalize_or_current("does/not/exist.json").expect("resolve");
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(result, cwd.join("does/not/exist.json"));
}

#[test]
fn display_relative_strips_base_when_possible() {
    let base = std::path::Path::new("/etc/hashguard");
    assert_eq!(display_relative(&base.join("file_hashes.json"), base), "file_hashes.json");
    assert_eq!(
        display_relative(std::path::Path::new("/var/lib/x.json"), base),
        "/var/lib/x.json"
    );
}

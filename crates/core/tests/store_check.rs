// crates/core/tests/store_check.rs

use std::fs;
use std::path::Path;

use hashguard_core::digest::digest_bytes;
use hashguard_core::{
    AnomalyRecord, Classification, DigestAlgorithm, IntegrityError, IntegrityStore,
};
use tempfile::tempdir;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn deleted_file_is_reported_once() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a.txt");
    let b = tmp.path().join("b.txt");
    fs::write(&a, b"alpha").expect("write a");
    fs::write(&b, b"beta").expect("write b");

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline([path_str(&a), path_str(&b)]).unwrap().baseline;

    fs::remove_file(&a).expect("remove a");
    let report = store.check(&baseline).unwrap();

    assert_eq!(report.files_checked, 2);
    assert_eq!(report.anomalies, vec![AnomalyRecord::new(path_str(&a), Classification::Deleted)]);
}

#[test]
fn modified_file_is_reported_once() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a.txt");
    fs::write(&a, b"alpha").expect("write a");

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline([path_str(&a)]).unwrap().baseline;
    let recorded = baseline.get(&path_str(&a)).cloned().expect("tracked");

    fs::write(&a, b"alpha, edited").expect("modify a");
    let report = store.check(&baseline).unwrap();

    assert_eq!(report.anomalies, vec![AnomalyRecord::new(path_str(&a), Classification::Modified)]);
    assert_ne!(recorded, digest_bytes(DigestAlgorithm::Sha256, b"alpha, edited"));
}

#[test]
fn unchanged_files_check_clean_repeatedly() {
    let tmp = tempdir().expect("tempdir");
    let paths: Vec<String> = (0..4)
        .map(|i| {
            let p = tmp.path().join(format!("f{i}.txt"));
            fs::write(&p, format!("content {i}")).expect("write");
            path_str(&p)
        })
        .collect();

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    store.establish_baseline(&paths).unwrap();

    for _ in 0..3 {
        let report = store.check_persisted().unwrap();
        assert!(report.is_intact(), "unexpected anomalies: {:?}", report.anomalies);
        assert_eq!(report.files_checked, 4);
    }
}

#[test]
fn anomalies_follow_configured_order() {
    let tmp = tempdir().expect("tempdir");
    let names = ["c.txt", "a.txt", "b.txt"];
    let paths: Vec<String> = names
        .iter()
        .map(|n| {
            let p = tmp.path().join(n);
            fs::write(&p, n.as_bytes()).expect("write");
            path_str(&p)
        })
        .collect();

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline(&paths).unwrap().baseline;

    for p in &paths {
        fs::write(p, b"changed").expect("modify");
    }

    let first = store.check(&baseline).unwrap();
    let second = store.check(&baseline).unwrap();
    assert_eq!(first, second);

    let reported: Vec<&str> = first.anomalies.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(reported, paths.iter().map(String::as_str).collect::<Vec<_>>());

    // Order survives the trip through the store file.
    let persisted = store.check_persisted().unwrap();
    assert_eq!(persisted, first);
}

#[test]
fn unreadable_entry_aborts_check_instead_of_reporting_deleted() {
    let tmp = tempdir().expect("tempdir");
    let dir = tmp.path().join("dir");
    let child = dir.join("child.txt");
    fs::create_dir(&dir).expect("mkdir");
    fs::write(&child, b"payload").expect("write child");

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline([path_str(&child)]).unwrap().baseline;

    // Opening "dir/child.txt" now fails with ENOTDIR, even for root.
    fs::remove_dir_all(&dir).expect("remove dir");
    fs::write(&dir, b"not a directory").expect("replace dir with file");

    match store.check(&baseline) {
        Err(IntegrityError::Io { path, .. }) => assert_eq!(path, child),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn file_missing_at_baseline_is_never_reported() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a.txt");
    let missing = tmp.path().join("missing.txt");
    fs::write(&a, b"alpha").expect("write a");

    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline([path_str(&a), path_str(&missing)]).unwrap().baseline;

    // Even if it shows up later, a plain check only looks at baseline entries.
    fs::write(&missing, b"late arrival").expect("create missing");
    let report = store.check(&baseline).unwrap();
    assert!(report.anomalies.iter().all(|r| r.path != path_str(&missing)));
    assert!(report.is_intact());
}

#[test]
fn scan_reports_tracked_files_that_appeared() {
    let tmp = tempdir().expect("tempdir");
    let a = tmp.path().join("a.txt");
    let late = tmp.path().join("late.txt");
    let still_missing = tmp.path().join("still_missing.txt");
    fs::write(&a, b"alpha").expect("write a");

    let tracked = vec![path_str(&a), path_str(&late), path_str(&still_missing), path_str(&late)];
    let store = IntegrityStore::new(tmp.path().join("store.json"), DigestAlgorithm::Sha256);
    let baseline = store.establish_baseline(&tracked).unwrap().baseline;

    fs::write(&late, b"new").expect("create late");
    fs::write(&a, b"alpha!").expect("modify a");

    let report = store.scan(&baseline, &tracked).unwrap();
    assert_eq!(
        report.anomalies,
        vec![
            AnomalyRecord::new(path_str(&a), Classification::Modified),
            AnomalyRecord::new(path_str(&late), Classification::Added),
        ]
    );
}

/// x.txt: "hello" -> baseline, "hello!" -> MODIFIED, removed -> DELETED,
/// restored and re-baselined -> clean.
#[test]
fn end_to_end_modify_delete_restore() {
    let tmp = tempdir().expect("tempdir");
    let x = tmp.path().join("x.txt");
    let x_key = path_str(&x);
    fs::write(&x, b"hello").expect("write x");

    let store = IntegrityStore::new(tmp.path().join("file_hashes.json"), DigestAlgorithm::Sha256);
    let established = store.establish_baseline([x_key.clone()]).unwrap();
    assert_eq!(
        established.baseline.get(&x_key).map(|d| d.as_str()),
        Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
    );

    fs::write(&x, b"hello!").expect("modify x");
    assert_eq!(
        store.check_persisted().unwrap().anomalies,
        vec![AnomalyRecord::new(x_key.clone(), Classification::Modified)]
    );

    fs::remove_file(&x).expect("delete x");
    assert_eq!(
        store.check_persisted().unwrap().anomalies,
        vec![AnomalyRecord::new(x_key.clone(), Classification::Deleted)]
    );

    fs::write(&x, b"hello").expect("restore x");
    store.establish_baseline([x_key]).unwrap();
    assert!(store.check_persisted().unwrap().is_intact());
}

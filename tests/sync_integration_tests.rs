//! End-to-end `sync_all` integration tests.

use backsync::executor::backup_path;
use backsync::{sync_all, Config, SyncError, SyncOutcome};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_for(source: &Path, target: &Path, files: &[&str]) -> Config {
    Config::new(source, target, files.iter().copied())
}

fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_sync_into_empty_target() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    fs::write(src.path().join("a.txt"), b"alpha").expect("write a");
    fs::write(src.path().join("b.txt"), b"beta").expect("write b");

    let report = sync_all(&config_for(src.path(), dst.path(), &["a.txt", "b.txt"]), None)
        .expect("sync should run");

    assert_eq!((report.succeeded(), report.total()), (2, 2));
    assert!(report.is_success());
    assert_eq!(fs::read(dst.path().join("a.txt")).unwrap(), b"alpha");
    assert_eq!(fs::read(dst.path().join("b.txt")).unwrap(), b"beta");
    assert_eq!(dir_listing(dst.path()), vec!["a.txt", "b.txt"], "no backups expected");
}

#[test]
fn test_missing_source_is_not_an_error() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");

    let report =
        sync_all(&config_for(src.path(), dst.path(), &["a.txt"]), None).expect("sync should run");

    assert_eq!((report.succeeded(), report.total()), (0, 1));
    assert!(matches!(
        report.outcome("a.txt"),
        Some(SyncOutcome::SourceMissing)
    ));
    assert!(dir_listing(dst.path()).is_empty());
}

#[test]
fn test_missing_target_dir_writes_nothing() {
    let src = TempDir::new().expect("create src tempdir");
    let parent = TempDir::new().expect("create parent tempdir");
    let target = parent.path().join("Budget");
    fs::write(src.path().join("a.txt"), b"alpha").expect("write a");

    let err = sync_all(&config_for(src.path(), &target, &["a.txt"]), None).unwrap_err();

    assert!(matches!(err, SyncError::TargetDirectoryMissing { .. }));
    assert!(!target.exists());
    assert!(dir_listing(parent.path()).is_empty());
    assert_eq!(dir_listing(src.path()), vec!["a.txt"]);
}

#[test]
fn test_sync_updates_existing_files_with_backup() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    fs::write(src.path().join("same.txt"), b"new-data").expect("write source version");
    fs::write(dst.path().join("same.txt"), b"old").expect("write target version");

    let report =
        sync_all(&config_for(src.path(), dst.path(), &["same.txt"]), None).expect("sync should run");

    assert!(report.is_success());
    assert_eq!(fs::read(dst.path().join("same.txt")).unwrap(), b"new-data");
    assert_eq!(
        fs::read(backup_path(&dst.path().join("same.txt"))).unwrap(),
        b"old"
    );
}

#[test]
fn test_sync_twice_is_idempotent() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    fs::write(src.path().join("a.txt"), b"source").expect("write source");
    fs::write(dst.path().join("a.txt"), b"original").expect("write target");
    let config = config_for(src.path(), dst.path(), &["a.txt"]);
    let target = dst.path().join("a.txt");

    sync_all(&config, None).expect("first sync");
    let after_first = fs::read(&target).unwrap();
    sync_all(&config, None).expect("second sync");

    assert_eq!(fs::read(&target).unwrap(), after_first);
    assert_eq!(fs::read(backup_path(&target)).unwrap(), after_first);
}

#[test]
fn test_one_failure_does_not_stop_the_batch() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    for name in ["first.bas", "blocked.cls", "last.json"] {
        fs::write(src.path().join(name), name.as_bytes()).expect("write source");
    }
    fs::create_dir(dst.path().join("blocked.cls")).expect("create blocking dir");

    let report = sync_all(
        &config_for(src.path(), dst.path(), &["first.bas", "blocked.cls", "last.json"]),
        None,
    )
    .expect("sync should run");

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcome("blocked.cls"),
        Some(SyncOutcome::CopyFailed(_))
    ));
    assert_eq!(fs::read(dst.path().join("last.json")).unwrap(), b"last.json");
}

#[test]
fn test_results_follow_configured_order() {
    let src = TempDir::new().expect("create src tempdir");
    let dst = TempDir::new().expect("create dst tempdir");
    fs::write(src.path().join("z.txt"), b"z").expect("write z");
    fs::write(src.path().join("a.txt"), b"a").expect("write a");

    let report = sync_all(
        &config_for(src.path(), dst.path(), &["z.txt", "missing.txt", "a.txt"]),
        None,
    )
    .expect("sync should run");

    let order: Vec<&str> = report.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(order, vec!["z.txt", "missing.txt", "a.txt"]);
}

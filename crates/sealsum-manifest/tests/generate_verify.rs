//! Integration test: generate → verify round-trips on real directories
//!
//! Covers the full list pipeline: hash → write list → re-read → re-hash →
//! per-entry report, including missing-file and tampered-file detection.

use std::path::{Path, PathBuf};

use sealsum_manifest::{generate, verify, HashAlgo, VerifyStatus};
use tempfile::TempDir;

fn write_test_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}

fn three_file_set(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_test_file(dir, "a.txt", b"hello"),
        write_test_file(dir, "b.txt", b"world"),
        write_test_file(dir, "c.txt", b""),
    ]
}

#[test]
fn generate_then_verify_all_ok() {
    let tmp = TempDir::new().unwrap();
    let files = three_file_set(tmp.path());
    let list = tmp.path().join("checksums.sha256sum");

    let gen = generate(&files, HashAlgo::Sha256, &list, None).unwrap();
    assert!(gen.ok());
    assert_eq!(gen.written, 3);

    let report = verify(&list, HashAlgo::Sha256, None).unwrap();
    assert!(report.ok());
    assert_eq!(report.entries.len(), 3);
    for entry in &report.entries {
        assert_eq!(entry.status, VerifyStatus::Ok);
    }
}

#[test]
fn deleted_file_reports_missing() {
    let tmp = TempDir::new().unwrap();
    let files = three_file_set(tmp.path());
    let list = tmp.path().join("checksums.sha256sum");

    generate(&files, HashAlgo::Sha256, &list, None).unwrap();
    std::fs::remove_file(tmp.path().join("b.txt")).unwrap();

    let report = verify(&list, HashAlgo::Sha256, None).unwrap();
    assert!(!report.ok());

    let statuses: Vec<_> = report.entries.iter().map(|e| e.status.clone()).collect();
    assert_eq!(
        statuses,
        vec![VerifyStatus::Ok, VerifyStatus::Missing, VerifyStatus::Ok]
    );
}

#[test]
fn mutated_file_reports_mismatch() {
    let tmp = TempDir::new().unwrap();
    let files = three_file_set(tmp.path());
    let list = tmp.path().join("checksums.sha256sum");

    generate(&files, HashAlgo::Sha256, &list, None).unwrap();
    std::fs::write(tmp.path().join("a.txt"), b"hellp").unwrap();

    let report = verify(&list, HashAlgo::Sha256, None).unwrap();
    assert!(!report.ok());
    assert_eq!(report.entries[0].status, VerifyStatus::Mismatch);
    assert_eq!(report.entries[1].status, VerifyStatus::Ok);
    assert_eq!(report.entries[2].status, VerifyStatus::Ok);
}

#[test]
fn wrong_algorithm_mismatches_every_entry() {
    // The list does not record its algorithm; verifying with another one
    // mismatches everything rather than failing with a diagnostic.
    let tmp = TempDir::new().unwrap();
    let files = three_file_set(tmp.path());
    let list = tmp.path().join("checksums.sha256sum");

    generate(&files, HashAlgo::Sha256, &list, None).unwrap();

    let report = verify(&list, HashAlgo::Md5, None).unwrap();
    assert!(!report.ok());
    for entry in &report.entries {
        assert_eq!(entry.status, VerifyStatus::Mismatch);
    }
}

#[test]
fn list_order_follows_input_order() {
    let tmp = TempDir::new().unwrap();
    let z = write_test_file(tmp.path(), "z.txt", b"zzz");
    let a = write_test_file(tmp.path(), "a.txt", b"aaa");
    let list = tmp.path().join("list.sha1sum");

    // Input order deliberately not sorted: the engine must preserve it.
    generate(&[z.clone(), a.clone()], HashAlgo::Sha1, &list, None).unwrap();

    let content = std::fs::read_to_string(&list).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert!(lines[0].ends_with("z.txt"));
    assert!(lines[1].ends_with("a.txt"));

    let report = verify(&list, HashAlgo::Sha1, None).unwrap();
    assert_eq!(report.entries[0].path, z.display().to_string());
    assert_eq!(report.entries[1].path, a.display().to_string());
}

#[test]
fn all_algorithms_roundtrip() {
    for algo in [HashAlgo::Sha256, HashAlgo::Sha1, HashAlgo::Md5] {
        let tmp = TempDir::new().unwrap();
        let files = three_file_set(tmp.path());
        let list = tmp.path().join(algo.default_list_name());

        generate(&files, algo, &list, None).unwrap();
        let report = verify(&list, algo, None).unwrap();
        assert!(report.ok(), "{algo} round-trip must verify clean");
    }
}

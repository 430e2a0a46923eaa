//! Fatal and per-file failure handling

use crate::common::{doc_paths, TestCorpus};
use corpus_loader::{load, CorpusError, LoaderConfig, SkipReason};
use std::path::PathBuf;

#[test]
fn test_missing_directory_is_not_found() {
    let repo = TestCorpus::with_files(&[]);
    let missing = repo.path().join("does-not-exist");

    let result = load(&missing, &LoaderConfig::default());

    match result {
        Err(CorpusError::NotFound(path)) => assert!(path.contains("does-not-exist")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_file_as_root_is_rejected() {
    let repo = TestCorpus::with_files(&[("a.md", "x")]);

    let err = load(repo.path().join("a.md"), &LoaderConfig::default()).unwrap_err();

    assert!(matches!(err, CorpusError::NotADirectory(_)));
    assert!(err.is_bad_request());
}

#[test]
fn test_invalid_config_fails_before_scanning() {
    let repo = TestCorpus::small();
    let config = LoaderConfig::default().with_max_file_bytes(Some(0));

    let err = load(repo.path(), &config).unwrap_err();

    assert!(matches!(err, CorpusError::ConfigError(_)));
}

#[test]
fn test_oversized_file_is_recorded() {
    let big = "x".repeat(4096);
    let repo = TestCorpus::with_files(&[("small.md", "ok"), ("big.md", &big)]);

    let config = LoaderConfig::default().with_max_file_bytes(Some(1024));
    let report = load(repo.path(), &config).unwrap().collect_report();

    assert_eq!(doc_paths(&report.documents), vec!["small.md"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("big.md"));
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::SizeLimit {
            size: 4096,
            limit: 1024
        }
    );
}

#[test]
fn test_invalid_utf8_is_recorded() {
    let mut repo = TestCorpus::with_files(&[("a.md", "fine"), ("c.md", "also fine")]);
    repo.add_bytes("b.md", &[b'h', b'i', 0x80, b'!']);

    let report = load(repo.path(), &LoaderConfig::default())
        .unwrap()
        .collect_report();

    assert_eq!(doc_paths(&report.documents), vec!["a.md", "c.md"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("b.md"));
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::Encoding { valid_up_to: 2 }
    );
}

#[test]
fn test_multiple_failures_are_all_recorded_in_order() {
    let big = "y".repeat(100);
    let mut repo = TestCorpus::with_files(&[("b.md", "ok"), ("d.md", &big)]);
    repo.add_bytes("a.md", &[0xff]);
    repo.add_bytes("c.txt", &[0xfe, 0xff]);

    let config = LoaderConfig::default().with_max_file_bytes(Some(50));
    let report = load(repo.path(), &config).unwrap().collect_report();

    assert_eq!(doc_paths(&report.documents), vec!["b.md"]);
    let skipped: Vec<(PathBuf, &str)> = report
        .skipped
        .iter()
        .map(|s| (s.path.clone(), s.reason.kind()))
        .collect();
    assert_eq!(
        skipped,
        vec![
            (PathBuf::from("a.md"), "encoding"),
            (PathBuf::from("c.txt"), "encoding"),
            (PathBuf::from("d.md"), "size_limit"),
        ]
    );
}

#[test]
fn test_each_pass_has_its_own_skip_list() {
    let mut repo = TestCorpus::with_files(&[("ok.md", "ok")]);
    repo.add_bytes("bad.md", &[0xff]);

    let corpus = load(repo.path(), &LoaderConfig::default()).unwrap();

    let mut first = corpus.iter();
    first.by_ref().for_each(drop);
    let mut second = corpus.iter();
    second.by_ref().for_each(drop);

    assert_eq!(first.skipped().len(), 1);
    assert_eq!(second.skipped().len(), 1);
}

#[test]
fn test_one_vanished_among_four_readable() {
    let repo = TestCorpus::with_files(&[
        ("one.md", "1"),
        ("two.md", "2"),
        ("three.md", "3"),
        ("four.md", "4"),
        ("gone.md", "soon deleted"),
    ]);

    let corpus = load(repo.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(corpus.len(), 5);
    std::fs::remove_file(repo.path().join("gone.md")).unwrap();

    let mut docs = corpus.iter();
    let loaded: Vec<_> = docs.by_ref().collect();

    assert_eq!(
        doc_paths(&loaded),
        vec!["four.md", "one.md", "three.md", "two.md"]
    );
    assert_eq!(docs.skipped().len(), 1);
    assert_eq!(docs.skipped()[0].path, PathBuf::from("gone.md"));
    assert_eq!(docs.skipped()[0].reason.kind(), "io");
}

#[cfg(unix)]
#[test]
fn test_one_unreadable_among_four_readable() {
    use crate::common::helpers::{make_unreadable, restore_permissions};

    let repo = TestCorpus::with_files(&[
        ("one.md", "1"),
        ("two.md", "2"),
        ("three.md", "3"),
        ("four.md", "4"),
        ("locked.md", "secret"),
    ]);
    let locked = repo.path().join("locked.md");

    if !make_unreadable(&locked) {
        // Privileged user: permissions are not enforced
        restore_permissions(&locked, 0o644);
        return;
    }

    let report = load(repo.path(), &LoaderConfig::default())
        .unwrap()
        .collect_report();
    restore_permissions(&locked, 0o644);

    assert_eq!(report.documents.len(), 4);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("locked.md"));
    assert_eq!(report.skipped[0].reason, SkipReason::Permission);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_does_not_abort() {
    use crate::common::helpers::{make_unreadable, restore_permissions};

    let repo = TestCorpus::with_files(&[("top.md", "t"), ("locked/inner.md", "i")]);
    let locked = repo.path().join("locked");

    if !make_unreadable(&locked) {
        restore_permissions(&locked, 0o755);
        return;
    }

    let config = LoaderConfig::default().with_recursive(true);
    let result = load(repo.path(), &config).map(|c| c.collect_report());
    restore_permissions(&locked, 0o755);

    let report = result.unwrap();
    assert_eq!(doc_paths(&report.documents), vec!["top.md"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, PathBuf::from("locked"));
    assert_eq!(report.skipped[0].reason, SkipReason::Permission);
}

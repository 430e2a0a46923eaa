//! Tests for the load CLI command
//!
//! - Loading in human and JSON formats
//! - Command-line options layered over configuration
//! - Error cases (missing path, invalid options)

use crate::common::TestCorpus;
use corpus_loader::cli::commands::load::{execute, execute_to, LoadArgs};
use corpus_loader::cli::OutputFormat;
use corpus_loader::{Config, CorpusError};
use std::path::Path;

fn load_args(path: &Path) -> LoadArgs {
    LoadArgs {
        path: path.to_path_buf(),
        extensions: vec![],
        recursive: false,
        no_recursive: false,
        max_file_bytes: None,
        exclude: vec![],
        show_content: false,
    }
}

fn run(args: LoadArgs, config: &Config, format: OutputFormat) -> String {
    let mut buf = Vec::new();
    execute_to(args, config, format, &mut buf).expect("load command should succeed");
    String::from_utf8(buf).unwrap()
}

fn run_json(args: LoadArgs, config: &Config) -> serde_json::Value {
    serde_json::from_str(&run(args, config, OutputFormat::Json)).unwrap()
}

fn json_paths(value: &serde_json::Value) -> Vec<String> {
    value["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap().replace('\\', "/"))
        .collect()
}

#[test]
fn test_load_human_lists_each_document() {
    let repo = TestCorpus::small();

    let text = run(load_args(repo.path()), &Config::default(), OutputFormat::Human);
    let lines: Vec<&str> = text.lines().collect();

    // header, five documents, summary
    assert_eq!(lines.len(), 7);
    assert!(lines[0].contains("Documents in"));
    for (line, name) in lines[1..6].iter().zip([
        "chunking.md",
        "embeddings.txt",
        "glossary.txt",
        "intro.md",
        "rerank.md",
    ]) {
        assert!(line.contains(name), "{line:?} should mention {name}");
    }
    assert!(!text.contains("image.png"));
    assert!(lines[6].contains("Loaded"));
}

#[test]
fn test_load_json_with_content() {
    let repo = TestCorpus::small();
    let mut args = load_args(repo.path());
    args.show_content = true;

    let json = run_json(args, &Config::default());

    assert_eq!(json["documents"].as_array().unwrap().len(), 5);
    assert_eq!(json["documents"][0]["path"], "chunking.md");
    assert_eq!(
        json["documents"][0]["content"],
        "Split documents into passages."
    );
    assert_eq!(json["documents"][0]["content_type"], "text/markdown");
    assert_eq!(json["documents"][1]["content_type"], "text/plain");
    assert_eq!(json["stats"]["files_loaded"], 5);
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_load_json_omits_content_by_default() {
    let repo = TestCorpus::with_files(&[("a.md", "hello")]);

    let json = run_json(load_args(repo.path()), &Config::default());

    assert_eq!(json["documents"][0]["byte_length"], 5);
    assert!(json["documents"][0].get("content").is_none());
}

#[test]
fn test_load_with_skips_still_succeeds() {
    let mut repo = TestCorpus::with_files(&[("ok.md", "fine")]);
    repo.add_bytes("bad.md", &[0xff, 0xfe]);
    let mut args = load_args(repo.path());
    args.max_file_bytes = Some(1);

    let text = run(args, &Config::default(), OutputFormat::Human);

    let skip_lines: Vec<&str> = text.lines().filter(|l| l.contains("skipped ")).collect();
    assert_eq!(skip_lines.len(), 2);
    assert!(skip_lines[0].contains("bad.md"));
    assert!(skip_lines[1].contains("ok.md"));
}

#[test]
fn test_load_json_reports_skip_reasons() {
    let mut repo = TestCorpus::with_files(&[("ok.md", "fine")]);
    repo.add_bytes("bad.md", &[0xff, 0xfe]);

    let json = run_json(load_args(repo.path()), &Config::default());

    assert_eq!(json_paths(&json), vec!["ok.md"]);
    assert_eq!(json["skipped"][0]["path"], "bad.md");
    assert_eq!(json["skipped"][0]["reason"]["kind"], "encoding");
    assert_eq!(json["stats"]["files_skipped"], 1);
}

#[test]
fn test_load_recursive_with_options() {
    let repo = TestCorpus::nested();
    let mut args = load_args(repo.path());
    args.recursive = true;
    args.extensions = vec!["md".to_string()];
    args.exclude = vec!["drafts".to_string()];

    let json = run_json(args, &Config::default());

    assert_eq!(
        json_paths(&json),
        vec!["README.md", "guides/advanced/tuning.md", "guides/setup.md"]
    );
}

#[test]
fn test_no_recursive_flag_beats_config() {
    let repo = TestCorpus::nested();
    let mut config = Config::default();
    config.loader.recursive = true;
    let mut args = load_args(repo.path());
    args.no_recursive = true;

    let json = run_json(args, &config);

    assert_eq!(json_paths(&json), vec!["README.md"]);
}

#[test]
fn test_load_missing_directory() {
    let repo = TestCorpus::with_files(&[]);
    let args = load_args(&repo.path().join("missing"));

    let err = execute(args, &Config::default(), OutputFormat::Human).unwrap_err();

    let corpus_err = err
        .downcast_ref::<CorpusError>()
        .expect("fatal loader error is passed through");
    assert!(corpus_err.is_not_found());
}

#[test]
fn test_load_invalid_exclude_pattern() {
    let repo = TestCorpus::small();
    let mut args = load_args(repo.path());
    args.exclude = vec!["[broken".to_string()];

    let err = execute(args, &Config::default(), OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("[broken"));
}

#[test]
fn test_load_uses_configured_extensions() {
    let repo = TestCorpus::with_files(&[("a.rst", "rst"), ("b.md", "md")]);
    let mut config = Config::default();
    config.loader = config.loader.with_extensions(["rst"]);

    let args = load_args(repo.path());
    let merged = args.loader_config(&config.loader);
    assert!(merged.extensions.contains("rst"));
    assert!(!merged.extensions.contains("md"));

    let json = run_json(args, &config);
    assert_eq!(json_paths(&json), vec!["a.rst"]);
}

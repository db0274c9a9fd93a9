//! End-to-end tests for the `preprocess` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn preprocess() -> Command {
    let mut cmd = Command::cargo_bin("preprocess").unwrap();
    cmd.env_remove("VERSEBOOK_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_docs(dir: &Path) {
    fs::write(dir.join("index.md"), "# Verse\n\nWelcome to the reference.\n").unwrap();
    fs::write(
        dir.join("00_overview.md"),
        "# Overview\n\n<!-- 01 -->\n```verse\nPrint(\"hi\")\n```\n\nNext: [Expressions](01_expressions.md).\n",
    )
    .unwrap();
    fs::write(
        dir.join("01_expressions.md"),
        "# Expressions\n\n!!! note\n    Everything is an expression.\n",
    )
    .unwrap();
}

#[test]
fn missing_docs_dir_exits_with_error() {
    preprocess()
        .arg("/nonexistent/versebook-docs")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    preprocess().assert().failure();
}

#[test]
fn writes_document_to_output_file() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());
    let out = TempDir::new().unwrap();
    let out_file = out.path().join("book.md");

    preprocess()
        .arg(docs.path())
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: index.md -> Preface"))
        .stdout(predicate::str::contains("Processing: 01_expressions.md -> Expressions"))
        .stdout(predicate::str::contains("Written to:"));

    let text = fs::read_to_string(&out_file).unwrap();
    assert!(text.starts_with("# Preface\n\nWelcome to the reference.\n"));
    assert!(text.contains("\\part{Part I: Fundamentals}"));
    assert!(text.contains("# Chapter 1: Overview {#chapter-01}"));
    assert!(text.contains("```{.verse .numberLines}"));
    assert!(text.contains("Next: [Expressions](#chapter-02)."));
    assert!(text.contains("# Chapter 2: Expressions {#chapter-02}"));
    assert!(text.contains("::: {notebox}\n**Note**\n\nEverything is an expression.\n:::"));
    assert!(!text.contains("<!-- 01 -->"));
    assert_eq!(text.matches("\\newpage").count(), 3);

    let preface = text.find("# Preface").unwrap();
    let part = text.find("\\part{").unwrap();
    let overview = text.find("# Chapter 1:").unwrap();
    let expressions = text.find("# Chapter 2:").unwrap();
    assert!(preface < part && part < overview && overview < expressions);
}

#[test]
fn writes_document_to_stdout_without_progress_lines() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());

    preprocess()
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# Chapter 2: Expressions {#chapter-02}"))
        .stdout(predicate::str::contains("Processing:").not())
        .stderr(predicate::str::contains("Processing: 00_overview.md -> Overview"));
}

#[test]
fn render_config_overrides_markers() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());
    let config = docs.path().join("versebook.toml");
    fs::write(&config, "[markers]\npage_break = '\\clearpage'\n").unwrap();

    preprocess()
        .arg("--config")
        .arg(&config)
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\\clearpage"))
        .stdout(predicate::str::contains("\\newpage").not());
}

#[test]
fn invalid_config_is_fatal() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());
    let config = docs.path().join("versebook.toml");
    fs::write(&config, "[markers]\nunknown_marker = true\n").unwrap();

    preprocess()
        .arg("--config")
        .arg(&config)
        .arg(docs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn list_chapters_as_json() {
    preprocess()
        .args(["--list-chapters", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filename\": \"06_functions.md\""))
        .stdout(predicate::str::contains("\"anchor\": \"chapter-07\""))
        .stdout(predicate::str::contains("\"opens_part\": \"Part V: Production\""));
}

#[test]
fn list_chapters_as_text() {
    preprocess()
        .arg("--list-chapters")
        .assert()
        .success()
        .stdout(predicate::str::contains("Part III: Object-Oriented Programming"))
        .stdout(predicate::str::contains("#concept-index"));
}

#[test]
fn show_config_prints_defaults() {
    preprocess()
        .arg("--show-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("number_lines_language = \"verse\""));
}

#[test]
fn missing_chapters_are_reported_without_logging() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());
    let out = TempDir::new().unwrap();
    let out_file = out.path().join("book.md");

    preprocess()
        .env("RUST_LOG", "off")
        .arg(docs.path())
        .arg(&out_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("02_primitives.md not found, skipping"))
        .stdout(predicate::str::contains("Warning: "))
        .stdout(predicate::str::contains("concept_index.md not found, skipping"))
        .stdout(predicate::str::contains("/index.md not found").not());
}

#[test]
fn skip_warnings_go_to_stderr_when_document_is_on_stdout() {
    let docs = TempDir::new().unwrap();
    write_docs(docs.path());

    preprocess()
        .env("RUST_LOG", "off")
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning:").not())
        .stderr(predicate::str::contains("02_primitives.md not found, skipping"));
}

#[test]
fn help_describes_progress_stream() {
    preprocess()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("progress lines move to stderr"));
}

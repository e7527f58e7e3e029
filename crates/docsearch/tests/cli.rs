//! CLI integration tests for docsearch commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// A small documentation site index.
const INDEX: &str = r#"[
  {
    "title": "Sample metadata",
    "content": "Every row of the table describes one sample. The metadata column specifies how each value was measured.",
    "section": "Guidelines",
    "keywords": "sdrf annotation",
    "url": "./metadata.html"
  },
  {
    "title": "Protocols",
    "content": "The protocol column lists each step of the sample preparation.",
    "section": "Templates",
    "keywords": "",
    "url": "./templates/protocols.html"
  },
  {
    "title": "Contributing",
    "content": "Open a pull request against the main branch.",
    "section": "Project",
    "keywords": "github",
    "url": "./contributing.html"
  }
]"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a docsearch command.
fn docsearch() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("docsearch").unwrap()
}

/// Helper to run `docsearch` in `dir` with HOME isolated to it.
fn docsearch_in(dir: &Path) -> Command {
    let mut cmd = docsearch();
    cmd.current_dir(dir).env("HOME", dir).env_remove("RUST_LOG");
    cmd
}

/// Creates a site with `search-index.json` at its root.
fn site() -> tempfile::TempDir {
    let dir = temp_dir();
    fs::write(dir.path().join("search-index.json"), INDEX).unwrap();
    dir
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

mod search {
    use super::*;

    #[test]
    fn finds_document_in_default_index() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .args(["search", "protocol"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.starts_with("1. Protocols"));
        assert!(stdout.contains("./templates/protocols.html"));
    }

    #[test]
    fn tolerates_typos() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .args(["search", "metadta"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("Sample metadata"));
    }

    #[test]
    fn no_results_marker() {
        let dir = site();
        docsearch_in(dir.path())
            .args(["search", "zebrafish"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found"));
    }

    #[test]
    fn short_query_prints_nothing() {
        let dir = site();
        docsearch_in(dir.path())
            .args(["search", "a"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn html_output_marks_terms() {
        let dir = site();
        docsearch_in(dir.path())
            .args(["search", "protocol", "--html"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<a href="./templates/protocols.html" class="search-result-item">"#,
            ))
            .stdout(predicate::str::contains("<mark>protocol</mark>"));
    }

    #[test]
    fn json_output() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .args(["search", "sample", "--json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["query"], "sample");
        assert_eq!(json["strategy"], "expanded");
        assert_eq!(json["expression"], "sample* sample~1");
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(json["total_matches"], 2);
        assert!(results[0]["snippet"]["text"].is_string());
    }

    #[test]
    fn syntax_characters_fall_back_to_literal() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .args(["search", "metadata^", "--json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["strategy"], "literal");
        assert_eq!(json["results"][0]["title"], "Sample metadata");
    }

    #[test]
    fn explain_shows_expression() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .args(["search", "proto", "--explain"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("proto* proto~1"));
        assert!(stdout.contains("expanded"));
    }

    #[test]
    fn explicit_index_path() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/custom.json"), INDEX).unwrap();

        docsearch_in(dir.path())
            .args(["search", "github", "--index", "public/custom.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Contributing"));
    }

    #[test]
    fn nested_page_resolves_parent_index() {
        let dir = site();
        fs::create_dir_all(dir.path().join("templates")).unwrap();

        let output = docsearch_in(dir.path())
            .args(["search", "protocol", "--page", "templates/human.html"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.starts_with("1. Protocols"));
    }

    #[test]
    fn embedded_script_payload() {
        let dir = temp_dir();
        fs::write(
            dir.path().join("search-index.js"),
            format!("// generated\nconst SEARCH_INDEX = {INDEX};\n"),
        )
        .unwrap();

        docsearch_in(dir.path())
            .args(["search", "github", "--embedded", "search-index.js"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Contributing"));
    }

    #[test]
    fn conflicting_sources_rejected() {
        let dir = site();
        docsearch_in(dir.path())
            .args([
                "search",
                "protocol",
                "--index",
                "search-index.json",
                "--page",
                "index.html",
            ])
            .assert()
            .failure();
    }

    #[test]
    fn missing_index_fails() {
        let dir = temp_dir();
        docsearch_in(dir.path())
            .args(["search", "protocol"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load search index"));
    }

    #[test]
    fn malformed_index_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join("search-index.json"), "<html>404</html>").unwrap();
        docsearch_in(dir.path())
            .args(["search", "protocol"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load search index"));
    }

    #[test]
    fn configured_result_limit() {
        let dir = site();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[search]\nresult_limit = 1\n",
        )
        .unwrap();

        let output = docsearch_in(dir.path())
            .args(["search", "sample", "--json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
        assert_eq!(json["total_matches"], 2);
    }
}

mod interactive {
    use super::*;

    #[test]
    fn debounced_lines_print_final_panel() {
        let dir = site();
        let output = docsearch_in(dir.path())
            .arg("interactive")
            .write_stdin("m\nme\nmet\nmetadata\n")
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("> metadata"));
        assert!(stdout.contains("Sample metadata"));
    }

    #[test]
    fn unavailable_index_fails() {
        let dir = temp_dir();
        docsearch_in(dir.path())
            .arg("interactive")
            .write_stdin("metadata\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Search unavailable"));
    }
}

mod check {
    use super::*;

    #[test]
    fn lists_documents() {
        let dir = site();
        let output = docsearch_in(dir.path()).arg("check").output().unwrap();

        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("Sample metadata"));
        assert!(stdout.contains("./contributing.html"));
        assert!(stdout.contains("Index: ok (3 documents)"));
        assert!(stdout.contains("No issues found."));
    }

    #[test]
    fn reports_empty_fields() {
        let dir = temp_dir();
        fs::write(
            dir.path().join("search-index.json"),
            r#"[{"title": "Untitled", "content": null, "url": "x.html"}]"#,
        )
        .unwrap();

        docsearch_in(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("empty fields"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config() {
        let dir = temp_dir();
        docsearch_in(dir.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"));

        assert!(dir.path().join(".docsearch.toml").exists());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "# mine\n").unwrap();

        docsearch_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));

        let content = fs::read_to_string(dir.path().join(".docsearch.toml")).unwrap();
        assert_eq!(content, "# mine\n");
    }

    #[test]
    fn force_overwrites() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "# mine\n").unwrap();

        docsearch_in(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let content = fs::read_to_string(dir.path().join(".docsearch.toml")).unwrap();
        assert!(content.contains("[search]"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_defaults() {
        let dir = temp_dir();
        docsearch_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("[search]"))
            .stdout(predicate::str::contains("debounce_ms = 200"));
    }

    #[test]
    fn shows_overrides() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[widget]\ndebounce_ms = 150\n",
        )
        .unwrap();

        docsearch_in(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("debounce_ms = 150"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "[search\n").unwrap();

        docsearch_in(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

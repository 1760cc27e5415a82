//! CLI integration tests for quill commands.
//!
//! These tests focus on exit codes, JSON payloads and ordering, not on the
//! exact text layout which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a quill command.
fn quill() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quill").unwrap()
}

/// Helper to run `quill` with HOME isolated to the provided directory.
fn quill_with_home(home: &Path) -> Command {
    let mut cmd = quill();
    cmd.env("HOME", home);
    cmd.env_remove("QUILL_LOG");
    cmd
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

/// Writes `<root>/_posts/<category>/<slug>/post.md`.
fn write_post(root: &Path, category: &str, slug: &str, source: &str) {
    let dir = root.join("_posts").join(category).join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("post.md"), source).unwrap();
}

/// Creates a small blog with a root config and four posts in three categories.
fn setup_blog() -> tempfile::TempDir {
    let dir = temp_dir();
    fs::write(
        dir.path().join(".quill.toml"),
        "root = true\n[content]\nposts = \"_posts\"\n",
    )
    .unwrap();

    write_post(
        dir.path(),
        "frontend",
        "react-hooks",
        "---\ntitle: Learning React Hooks\ndate: 2024-03-01\ntags: [react, hooks]\n---\n\
         # Hooks\n\nHooks let function components hold state without classes.\n",
    );
    write_post(
        dir.path(),
        "frontend",
        "css-grid",
        "---\ntitle: CSS Grid Layouts\ndate: 2023-11-20\ntags: css\n---\n\
         Grid areas make responsive layouts readable.\n",
    );
    write_post(
        dir.path(),
        "backend",
        "rust-errors",
        "---\ntitle: Error Handling in Rust\ndate: 2024-05-10\ntags: [rust, errors]\n---\n\
         Rust's question mark operator propagates failures to the caller.\n",
    );
    write_post(
        dir.path(),
        "notes",
        "ko-search",
        "---\ntitle: 한국어 검색\ndate: 2022-01-01\n---\n형태소 분석 없이 검색합니다.\n",
    );
    dir
}

/// Runs a command and parses its stdout as JSON.
fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let dir = temp_dir();

        quill_with_home(home.path())
            .current_dir(dir.path())
            .args(["init"])
            .assert()
            .success();

        let config_path = dir.path().join(".quill.toml");
        assert!(config_path.exists());

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# [content]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "existing").unwrap();

        quill_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_existing() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "old content").unwrap();

        quill_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".quill.toml")).unwrap();
        assert!(contents.contains("# [content]"));
    }

    #[test]
    fn works_with_invalid_existing_config() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "[search").unwrap();

        quill_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let work = temp_dir();

        quill_with_home(home.path())
            .current_dir(work.path())
            .args(["init", "--global"])
            .assert()
            .success();

        assert!(home.path().join(".quill.toml").exists());
        assert!(!work.path().join(".quill.toml").exists());
        let contents = fs::read_to_string(home.path().join(".quill.toml")).unwrap();
        assert!(contents.contains("# [search]"));
    }

    #[test]
    fn init_in_home_writes_global_template() {
        let home = temp_dir();

        quill_with_home(home.path())
            .current_dir(home.path())
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".quill.toml")).unwrap();
        assert!(contents.contains("# Global quill configuration"));
        assert!(!contents.contains("[content]"));
    }
}

mod search {
    use super::*;

    #[test]
    fn finds_matching_documents() {
        let dir = setup_blog();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "hook"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Learning React Hooks"))
            .stdout(predicate::str::contains("frontend/react-hooks"));
    }

    #[test]
    fn prefix_words_must_all_match() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "rea", "hoo"]),
        );
        assert_eq!(body["query"], "rea hoo");
        assert_eq!(body["total"], 1);
        assert_eq!(body["results"][0]["slug"], "react-hooks");
    }

    #[test]
    fn returns_no_results_message() {
        let dir = setup_blog();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "zzzzz"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    }

    #[test]
    fn json_output_format() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "rust"]),
        );

        assert_eq!(body["query"], "rust");
        assert_eq!(body["total"], 1);
        let result = &body["results"][0];
        assert_eq!(result["id"], 1);
        assert_eq!(result["title"], "Error Handling in Rust");
        assert_eq!(result["category"], "backend");
        assert_eq!(result["slug"], "rust-errors");
        assert_eq!(result["date"], "2024-05-10");
        assert_eq!(result["minRead"], 1);
        assert_eq!(result["tags"], serde_json::json!(["rust", "errors"]));
        assert_eq!(
            result["matchedFields"],
            serde_json::json!(["title", "tags", "body"])
        );
        assert!(
            result["snippet"]
                .as_str()
                .unwrap()
                .contains("question mark operator")
        );
    }

    #[test]
    fn scalar_tags_are_ignored() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "css"]),
        );
        assert_eq!(body["total"], 1);
        assert_eq!(body["results"][0]["tags"], serde_json::json!([]));
        assert_eq!(
            body["results"][0]["matchedFields"],
            serde_json::json!(["title"])
        );
    }

    #[test]
    fn respects_limit() {
        let dir = setup_blog();

        let all = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "r"]),
        );
        assert!(all["total"].as_u64().unwrap() >= 2);

        let limited = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "-n", "1", "r"]),
        );
        assert_eq!(limited["total"], 1);
        assert_eq!(limited["results"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn title_matches_rank_first() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "r"]),
        );
        let first = &body["results"][0];
        assert_eq!(first["matchedFields"][0], "title");
    }

    #[test]
    fn finds_cjk_posts() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "검색"]),
        );
        assert_eq!(body["total"], 1);
        assert_eq!(body["results"][0]["slug"], "ko-search");
    }

    #[test]
    fn blank_query_is_empty_response() {
        let dir = setup_blog();

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["search", "--json", "   "]),
        );
        assert_eq!(
            body,
            serde_json::json!({ "query": "", "total": 0, "results": [] })
        );
    }

    #[test]
    fn empty_corpus_has_no_results() {
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "root = true\n").unwrap();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "anything"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    }

    #[test]
    fn malformed_front_matter_fails() {
        let dir = setup_blog();
        write_post(
            dir.path(),
            "broken",
            "bad-yaml",
            "---\ntitle: [unclosed\n---\nbody\n",
        );

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "react"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error: search failed"));
    }

    #[test]
    fn missing_post_file_fails() {
        let dir = setup_blog();
        fs::create_dir_all(dir.path().join("_posts/frontend/empty-slug")).unwrap();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "react"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("empty-slug"));
    }

    #[test]
    fn text_output_highlights_snippet() {
        let dir = setup_blog();

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["search", "grid"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("\x1b[1m\x1b[33mGrid\x1b[0m"));
        let plain = strip_ansi(&stdout);
        assert!(plain.contains("1 result for \"grid\""));
    }
}

mod ls {
    use super::*;

    #[test]
    fn lists_newest_first() {
        let dir = setup_blog();

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("ls")
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));

        let order: Vec<usize> = [
            "backend/rust-errors",
            "frontend/react-hooks",
            "frontend/css-grid",
            "notes/ko-search",
        ]
        .iter()
        .map(|slug| stdout.find(slug).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{stdout}");
    }

    #[test]
    fn filters_by_category() {
        let dir = setup_blog();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["ls", "--category", "backend", "--long"])
            .assert()
            .success()
            .stdout(predicate::str::contains("rust-errors"))
            .stdout(predicate::str::contains("tags: rust, errors"))
            .stdout(predicate::str::contains("react-hooks").not());
    }

    #[test]
    fn lists_categories_with_counts() {
        let dir = setup_blog();

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["ls", "--categories"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);

        let frontend = stdout
            .lines()
            .find(|line| line.contains("frontend"))
            .unwrap();
        assert!(frontend.contains('2'));
        assert!(frontend.contains("2024-03-01"));
        assert!(stdout.contains("notes"));
    }
}

mod inspect {
    use super::*;

    #[test]
    fn shows_extracted_document() {
        let dir = setup_blog();
        let post = dir.path().join("_posts/frontend/react-hooks/post.md");

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("inspect")
            .arg(&post)
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("Learning React Hooks"));
        assert!(stdout.contains("frontend/react-hooks"));
        assert!(stdout.contains("react, hooks"));
        assert!(stdout.contains("learning react hooks"));
        assert!(stdout.contains("Hooks let function components"));
        assert!(!stdout.contains("# Hooks"));
    }

    #[test]
    fn json_output() {
        let dir = setup_blog();
        let post = dir.path().join("_posts/backend/rust-errors/post.md");

        let body = json_stdout(
            quill_with_home(dir.path())
                .current_dir(dir.path())
                .args(["inspect", "--json"])
                .arg(&post),
        );
        assert_eq!(body["title"], "Error Handling in Rust");
        assert_eq!(body["category"], "backend");
        assert_eq!(body["slug"], "rust-errors");
        assert_eq!(body["minRead"], 1);
        assert!(body["body"].as_str().unwrap().starts_with("Rust's question"));
    }

    #[test]
    fn flags_unparseable_date() {
        let dir = temp_dir();
        write_post(dir.path(), "misc", "later", "---\ndate: next week\n---\nsoon\n");
        let post = dir.path().join("_posts/misc/later/post.md");

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("inspect")
            .arg(&post)
            .assert()
            .success()
            .stdout(predicate::str::contains("unparseable"));
    }

    #[test]
    fn fails_on_nonexistent_file() {
        let dir = temp_dir();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .args(["inspect", "nonexistent.md"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn fails_on_malformed_front_matter() {
        let dir = temp_dir();
        write_post(dir.path(), "misc", "bad", "---\ntags: [a\n---\nbody\n");
        let post = dir.path().join("_posts/misc/bad/post.md");

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("inspect")
            .arg(&post)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod status {
    use super::*;

    #[test]
    fn succeeds_with_valid_blog() {
        let dir = setup_blog();

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains(".quill.toml"));
        assert!(stdout.contains("4 posts in 3 categories"));
        assert!(stdout.contains("No issues found."));
    }

    #[test]
    fn fails_when_posts_missing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "root = true\n").unwrap();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("posts directory does not exist"));
    }

    #[test]
    fn warns_on_unknown_segmenter() {
        let dir = setup_blog();
        fs::write(
            dir.path().join(".quill.toml"),
            "root = true\n[search]\nsegmenter = \"klingon\"\n",
        )
        .unwrap();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("unknown segmenter 'klingon'"));
    }

    #[test]
    fn fails_on_invalid_toml() {
        let dir = temp_dir();
        fs::write(dir.path().join(".quill.toml"), "root = true\n[search\n").unwrap();

        quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".quill.toml"),
            "root = true\n[search]\ndefault_limit = 8\n",
        )
        .unwrap();

        let output = quill_with_home(dir.path())
            .current_dir(dir.path())
            .arg("config")
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("default_limit = 8"));
        assert!(stdout.contains("max_limit = 50"));
        assert!(stdout.contains("segmenter = \"mixed\""));
    }
}

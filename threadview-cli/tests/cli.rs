use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

const ARCHIVE: &str = r#"[
  {
    "title": "Greetings",
    "mapping": {
      "root": { "message": null },
      "node-1": {
        "message": {
          "author": { "role": "user" },
          "content": { "content_type": "text", "parts": ["Hello **there**", "second part"] }
        }
      },
      "node-2": {
        "message": {
          "author": { "role": "assistant" },
          "content": { "content_type": "text", "parts": ["| A | B |\n|---|---|\n| 1 | 2 |"] }
        }
      }
    }
  },
  {
    "title": "Assistant only",
    "mapping": {
      "node-3": {
        "message": {
          "author": { "role": "assistant" },
          "content": { "content_type": "text", "parts": ["just me"] }
        }
      }
    }
  },
  {
    "title": "<script>x</script>",
    "mapping": {
      "node-4": {
        "message": {
          "author": { "role": "user" },
          "content": { "content_type": "text", "parts": ["- item\n[site](https://x.test)"] }
        }
      }
    }
  }
]"#;

fn setup_archive() -> (TempDir, PathBuf) {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("conversations.json");
    fs::write(&path, ARCHIVE).expect("write");
    (temp, path)
}

fn threadview() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("threadview"));
    cmd.env_remove("THREADVIEW_BATCH_SIZE")
        .env_remove("THREADVIEW_ROLE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn default_outputs_html_document() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains(
            "<title>Conversations: conversations.json</title>",
        ))
        .stdout(predicate::str::contains("<h2>Thread 1: Greetings</h2>"))
        .stdout(predicate::str::contains(
            "<strong>user:</strong> Hello <b>there</b><br>second part",
        ))
        .stdout(predicate::str::contains(
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>",
        ))
        .stdout(predicate::str::contains("<h2>Thread 2: Assistant only</h2>"))
        .stdout(predicate::str::contains("Threads 1–3 of 3."));
}

#[test]
fn titles_and_links_are_rendered_safely() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<h2>Thread 3: &lt;script&gt;x&lt;/script&gt;</h2>",
        ))
        .stdout(predicate::str::contains("<script>x</script>").not())
        .stdout(predicate::str::contains("<ul><li>item</li></ul><br>"))
        .stdout(predicate::str::contains(
            r#"<a href="https://x.test" target="_blank" rel="noopener noreferrer">site</a>"#,
        ));
}

#[test]
fn user_only_hides_other_roles_and_empty_threads() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .arg("--user-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread 1: Greetings"))
        .stdout(predicate::str::contains("Thread 3:"))
        .stdout(predicate::str::contains("Assistant only").not())
        .stdout(predicate::str::contains("<strong>assistant:</strong>").not());
}

#[test]
fn role_filter_selects_any_role() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--role", "assistant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread 2: Assistant only"))
        .stdout(predicate::str::contains("<strong>user:</strong>").not());
}

#[test]
fn role_from_env_is_used_when_no_flag_given() {
    let (_temp, path) = setup_archive();

    threadview()
        .env("THREADVIEW_ROLE", "assistant")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("<strong>user:</strong>").not())
        .stdout(predicate::str::contains("<strong>assistant:</strong>"));
}

#[test]
fn window_reports_next_start_index() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--start", "1", "--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread 2: Assistant only"))
        .stdout(predicate::str::contains("Thread 1:").not())
        .stdout(predicate::str::contains("Thread 3:").not())
        .stdout(predicate::str::contains(
            "Threads 2–2 of 3. Next start index: 2.",
        ));
}

#[test]
fn filtered_window_shows_placeholder() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--start", "1", "--count", "1", "--user-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>No messages to display.</p>"))
        .stdout(predicate::str::contains("Next start index: 2."));
}

#[test]
fn batch_size_from_env_limits_window() {
    let (_temp, path) = setup_archive();

    threadview()
        .env("THREADVIEW_BATCH_SIZE", "2")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread 2: Assistant only"))
        .stdout(predicate::str::contains("Thread 3:").not())
        .stdout(predicate::str::contains("Next start index: 2."));
}

#[test]
fn all_loads_every_window() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--all", "--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread 1: Greetings"))
        .stdout(predicate::str::contains("Thread 3:"))
        .stdout(predicate::str::contains("Threads 1–3 of 3."))
        .stdout(predicate::str::contains("Next start index").not());
}

#[test]
fn raw_outputs_window_json() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--raw", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"next_index\": 2"))
        .stdout(predicate::str::contains("\"title\": \"Greetings\""))
        .stdout(predicate::str::contains("\"role\": \"assistant\""));
}

#[test]
fn raw_all_outputs_array_of_windows() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--raw", "--all", "--count", "2", "--user-only"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"next_index\": 2"))
        .stdout(predicate::str::contains("\"next_index\": 3"))
        .stdout(predicate::str::contains("\"role\": \"assistant\"").not());
}

#[test]
fn invalid_batch_size_env_fails() {
    let (_temp, path) = setup_archive();

    threadview()
        .env("THREADVIEW_BATCH_SIZE", "0")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "error: invalid configuration: THREADVIEW_BATCH_SIZE=0",
        ));
}

#[test]
fn missing_archive_fails() {
    let temp = tempdir().expect("tempdir");

    threadview()
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: i/o error on"));
}

#[test]
fn non_array_archive_fails() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("conversations.json");
    fs::write(&path, r#"{"title":"not a list"}"#).expect("write");

    threadview()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "top-level value must be an array of threads",
        ));
}

#[test]
fn user_only_conflicts_with_role() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--user-only", "--role", "assistant"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn zero_count_is_rejected() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--count", "0"])
        .assert()
        .failure();
}

#[test]
fn verbose_logs_to_stderr_only() {
    let (_temp, path) = setup_archive();

    threadview()
        .arg(&path)
        .args(["--verbose", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("rendering archive"));
}

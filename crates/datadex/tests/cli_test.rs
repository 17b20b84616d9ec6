//! Integration tests for the `datadex` CLI binary.
//!
//! Argument parsing, completions, and config handling run without a
//! catalog; the catalog-bound commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `datadex` binary with env isolation.
///
/// Clears all `DATADEX_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn datadex_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("datadex");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DATADEX_PROFILE")
        .env_remove("DATADEX_URL")
        .env_remove("DATADEX_TOKEN");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary against `server` on a blocking thread so the mock
/// server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = datadex_cmd(home.path());
    cmd.args(["--url", &server.uri()]).args(args);
    tokio::task::spawn_blocking(move || {
        let output = cmd.output().unwrap();
        drop(home);
        output
    })
    .await
    .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = datadex_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("data catalog")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("table"))
            .and(predicate::str::contains("bookmarks")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("datadex"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = datadex_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_popular_without_config_exits_with_config_code() {
    let home = tempfile::tempdir().unwrap();
    let output = datadex_cmd(home.path()).arg("popular").output().unwrap();
    assert_eq!(output.status.code(), Some(6));
    let text = combined_output(&output);
    assert!(text.contains("config"), "Expected config hint:\n{text}");
}

#[test]
fn test_unknown_profile_exits_with_config_code() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["--profile", "nope", "popular"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_feedback_rating_out_of_range() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["--url", "http://127.0.0.1:9", "feedback", "rating", "11"])
        .assert()
        .code(2);
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["config", "set", "url", "https://catalog.example.com"])
        .assert()
        .success();
    datadex_cmd(home.path())
        .args(["config", "set", "token", "s3cret"])
        .assert()
        .success();

    datadex_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));
    datadex_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://catalog.example.com")
                .and(predicate::str::contains("s3cret").not()),
        );
}

#[test]
fn test_config_set_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["config", "set", "colour", "red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_config_use_missing_profile() {
    let home = tempfile::tempdir().unwrap();
    datadex_cmd(home.path())
        .args(["config", "use", "staging"])
        .assert()
        .code(6);
}

// ── Catalog-bound commands ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_popular_plain_lists_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/popular_tables"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "results": [
                {"key": "hive://gold.core/orders", "name": "orders", "description": "All orders"},
                {"key": "hive://gold.core/users", "name": "users"}
            ]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "popular"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "hive://gold.core/orders\nhive://gold.core/users"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tags_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "tags": [{"tag_name": "finance", "tag_count": 4}]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "tags"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let tags: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tags, json!([{"tag_name": "finance", "tag_count": 4}]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_last_indexed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/last_indexed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"msg": "Success", "timestamp": 1_700_000_000})),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "last-indexed"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["timestamp"], 1_700_000_000);
    assert_eq!(value["text"], "Nov 14, 2023 22:13 UTC");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_table_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/table"))
        .and(query_param("key", "hive://gold.core/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"msg": "table not found"})),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["table", "hive://gold.core/missing"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("hive://gold.core/missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_table_key_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["table", "orders"]).await;
    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_table_detail_with_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/table"))
        .and(query_param("key", "hive://gold.core/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "tableData": {
                "key": "hive://gold.core/orders",
                "database": "hive",
                "cluster": "gold",
                "schema": "core",
                "name": "orders",
                "description": "All orders",
                "owners": [{"user_id": "ada", "email": "ada@example.com", "display_name": "Ada"}],
                "tags": [{"tag_name": "finance"}]
            }
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["table", "hive://gold.core/orders", "--tags"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/table_detail/gold/hive/core/orders"), "{stdout}");
    assert!(stdout.contains("All orders"));
    assert!(stdout.contains("finance"));
}

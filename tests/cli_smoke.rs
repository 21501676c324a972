use assert_cmd::prelude::*;
use std::process::{Command, Output};

/// Nothing listens on the discard port, so any request that slips through
/// would fail with a transport error instead of the expected message.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/graphql";

fn contribstat(args: &[&str]) -> Output {
    let mut cmd = Command::cargo_bin("contribstat").unwrap();
    cmd.env("GITHUB_TOKEN", "ghp_dummy")
        .env("CONTRIBSTAT_API__ENDPOINT", DEAD_ENDPOINT)
        .env_remove("RUST_LOG")
        .args(args);
    cmd.assert().failure().get_output().clone()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn invalid_filter_fails_before_any_query() {
    let out = contribstat(&["--users", "octocat", "--filter", "org/(unclosed"]);
    let err = stderr(&out);
    assert!(err.contains("invalid repository filter"), "{err}");
    assert!(!err.contains("transport"), "{err}");
    assert!(out.stdout.is_empty());
}

#[test]
fn invalid_timestamp_names_the_endpoint() {
    let out = contribstat(&["--users", "octocat", "--from", "2022-01-01", "--to", "2022-12-31T23:59:59Z"]);
    let err = stderr(&out);
    assert!(err.contains("`from`"), "{err}");
    assert!(err.contains("2022-01-01"), "{err}");
}

#[test]
fn max_repos_is_bounded() {
    let out = contribstat(&["--users", "octocat", "--max-repos", "0"]);
    assert!(stderr(&out).contains("--max-repos"));
}

#[test]
fn unreachable_api_fails_without_partial_output() {
    let out = contribstat(&["--users", "octocat,mble", "--output", "json"]);
    let err = stderr(&out);
    assert!(err.contains("Failed to collect contributions"), "{err}");
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_token_is_rejected() {
    let mut cmd = Command::cargo_bin("contribstat").unwrap();
    cmd.env_remove("GITHUB_TOKEN").args(["--users", "octocat"]);
    cmd.assert().failure();
}

#[test]
fn users_and_team_conflict() {
    contribstat(&["--users", "octocat", "--team", "acme/core"]);
}

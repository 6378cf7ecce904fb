#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::fs;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BATMAN_JSON: &str = include_str!("../../../fixtures/tmdb/search_movie_batman.json");
const EMPTY_JSON: &str = include_str!("../../../fixtures/tmdb/search_movie_empty.json");

/// Writes a config pointing the client at `base_url` and returns its directory.
fn config_dir(base_url: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("[tmdb]\nbase_url = \"{base_url}\"\ntimeout_secs = 5\n"),
    )
    .unwrap();
    dir
}

#[test]
fn test_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_search_blank_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_config_path_uses_dir() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["config", "path", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut first = cargo_bin_cmd!("cinesearch");
    first
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    let written = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[query]"));

    let mut second = cargo_bin_cmd!("cinesearch");
    second
        .args(["config", "init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_show_reads_file() {
    // Arrange
    let dir = config_dir("http://127.0.0.1:9");

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9"))
        .stdout(predicate::str::contains("toast_secs"));
}

#[test]
fn test_config_invalid_toml_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[tmdb\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["config", "show", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[tokio::test]
async fn test_search_prints_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "batman"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BATMAN_JSON))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir(&server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .env("TMDB_API_TOKEN", "test-token")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Batman"))
        .stdout(predicate::str::contains("Page 1 of 5"));
}

#[tokio::test]
async fn test_search_no_results() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_JSON))
        .mount(&server)
        .await;
    let dir = config_dir(&server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--query", "zzzxxxqqq", "--dir"])
        .arg(dir.path())
        .env("TMDB_API_TOKEN", "test-token")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("No movies found for your request"));
}

#[tokio::test]
async fn test_search_api_error_fails() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
        ))
        .mount(&server)
        .await;
    let dir = config_dir(&server.uri());

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .env_remove("TMDB_API_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB search/movie request failed"));
}

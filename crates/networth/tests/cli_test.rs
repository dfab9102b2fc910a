//! Integration tests for the `networth` CLI binary.
//!
//! Parsing, help and completions run without a backend; asset commands run
//! against a wiremock server passed through `--backend`.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `networth` binary with env isolation.
///
/// Clears all `NETWORTH_*` env vars and points config directories at an
/// empty temp dir so tests never touch the user's real configuration.
fn networth_cmd(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("networth");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("RUST_LOG")
        .env_remove("NETWORTH_PROFILE")
        .env_remove("NETWORTH_BACKEND")
        .env_remove("NETWORTH_TOKEN")
        .env_remove("NETWORTH_OUTPUT")
        .env_remove("NETWORTH_INSECURE")
        .env_remove("NETWORTH_TIMEOUT");
    cmd
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn cash_record() -> serde_json::Value {
    json!({
        "id": 11,
        "institution_name": "Credit Union",
        "account_name": "Emergency fund",
        "account_type": "savings",
        "current_balance": "5000.00",
        "currency": "USD"
    })
}

async fn mount_cash_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/cash-holdings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([cash_record()])))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = home();
    let output = networth_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let home = home();
    networth_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("summary"))
            .and(predicate::str::contains("health"))
            .and(predicate::str::contains("api-spec")),
    );
}

#[test]
fn version_flag() {
    let home = home();
    networth_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("networth"));
}

#[test]
fn completions_bash() {
    let home = home();
    networth_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completions_zsh() {
    let home = home();
    networth_cmd(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn unknown_asset_type_is_a_usage_error() {
    let home = home();
    let output = networth_cmd(&home)
        .args(["list", "bonds", "--backend", "http://127.0.0.1:9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("bonds"));
}

#[test]
fn list_without_backend_explains_setup() {
    let home = home();
    networth_cmd(&home)
        .args(["list", "cash"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn unknown_profile_is_reported() {
    let home = home();
    networth_cmd(&home)
        .args(["--profile", "work", "list", "cash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'work' not found"));
}

#[test]
fn schema_requires_a_target() {
    let home = home();
    networth_cmd(&home)
        .args(["schema", "--backend", "http://127.0.0.1:9"])
        .assert()
        .code(2);
}

#[test]
fn config_show_without_file_succeeds() {
    let home = home();
    networth_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn config_path_points_at_toml() {
    let home = home();
    networth_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn list_cash_renders_a_table() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;

    let home = home();
    networth_cmd(&home)
        .args(["--backend", &server.uri(), "--color", "never", "list", "cash"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Emergency fund")
                .and(predicate::str::contains("5,000.00"))
                .and(predicate::str::contains("Credit Union")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_cash_as_json_carries_transformed_numbers() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;

    let home = home();
    let output = networth_cmd(&home)
        .args(["--backend", &server.uri(), "-o", "json", "list", "cash"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(items[0]["id"], json!(11));
    assert_eq!(items[0]["current_balance"], json!(5000.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn show_missing_record_exits_not_found() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;

    let home = home();
    networth_cmd(&home)
        .args(["--backend", &server.uri(), "show", "cash", "99"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Cash holding 99 not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_cash_posts_the_coerced_form() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/cash_holding/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "cash_holding",
            "fields": [
                {"name": "institution_name", "type": "text", "required": true},
                {"name": "account_name", "type": "text", "required": true},
                {"name": "current_balance", "type": "currency", "required": true}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cash-holdings"))
        .and(body_json(json!({
            "institution_name": "Credit Union",
            "account_name": "Emergency fund",
            "current_balance": 5000
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(cash_record()))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    networth_cmd(&home)
        .args([
            "--backend",
            &server.uri(),
            "add",
            "cash",
            "--set",
            "institution_name=Credit Union",
            "--set",
            "account_name=Emergency fund",
            "--set",
            "current_balance=5,000",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cash holding added successfully!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_with_missing_required_field_never_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/plugins/cash_holding/schema"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fields": [{"name": "current_balance", "type": "currency", "required": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cash-holdings"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let home = home();
    networth_cmd(&home)
        .args(["--backend", &server.uri(), "add", "cash", "--set", "account_name=x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("current_balance"));
}

#[tokio::test(flavor = "multi_thread")]
async fn backend_rejection_text_is_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/stock-holdings"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "Unknown ticker symbol"})),
        )
        .mount(&server)
        .await;

    let home = home();
    networth_cmd(&home)
        .args([
            "--backend",
            &server.uri(),
            "add",
            "stocks",
            "--data",
            r#"{"symbol": "ZZZZ", "shares_owned": 1}"#,
        ])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Unknown ticker symbol"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_yes_skips_the_prompt() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/cash-holdings/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = home();
    networth_cmd(&home)
        .args(["--backend", &server.uri(), "-y", "delete", "cash", "11"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cash holding deleted successfully!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_as_json() {
    let server = MockServer::start().await;
    mount_cash_list(&server).await;
    for resource in [
        "stock-holdings",
        "crypto-holdings",
        "real-estate",
        "equity-grants",
        "manual-entries",
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/{resource}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
    }

    let home = home();
    let output = networth_cmd(&home)
        .args(["--backend", &server.uri(), "-o", "json", "summary"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["net_worth"], json!(5000.0));
    assert_eq!(summary["counts"]["cash"], json!(1));
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_services() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "database": "connected",
            "version": "1.4.0"
        })))
        .mount(&server)
        .await;

    let home = home();
    networth_cmd(&home)
        .args(["--backend", &server.uri(), "--color", "never", "health"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("healthy")
                .and(predicate::str::contains("Database"))
                .and(predicate::str::contains("1.4.0")),
        );
}

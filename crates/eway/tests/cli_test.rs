//! Integration tests for the `eway` CLI binary.
//!
//! Argument parsing, offline commands and the non-interactive purchase
//! flow, plus one purchase against a mocked backend.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `eway` binary with env isolation.
///
/// Clears all `EWAY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn eway_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("eway");
    cmd.env("HOME", "/tmp/eway-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/eway-cli-test-nonexistent")
        .env_remove("EWAY_PROFILE")
        .env_remove("EWAY_BACKEND")
        .env_remove("EWAY_EMAIL")
        .env_remove("EWAY_PASSWORD")
        .env_remove("EWAY_OUTPUT")
        .env_remove("EWAY_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const PAYLOAD: &str = r#"{"ticketId":"SP00000042","name":"Nimal Perera","type":"adult","startLocation":"Colombo","endLocation":"Galle","duration":"week","startDate":"2025-01-10","endDate":"2025-01-16","price":2000,"payment":"card","issued":"2025-01-10","validUntil":"2025-01-16","status":"ACTIVE","createdBy":1}"#;

fn write_payload(dir: &Path) -> String {
    let file = dir.join("pass.json");
    std::fs::write(&file, PAYLOAD).unwrap();
    file.to_string_lossy().into_owned()
}

fn write_id_photo(dir: &Path) -> String {
    let file = dir.join("id.png");
    std::fs::write(&file, b"\x89PNG fake image").unwrap();
    file.to_string_lossy().into_owned()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = eway_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    eway_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("season passes")
            .and(predicate::str::contains("buy"))
            .and(predicate::str::contains("verify"))
            .and(predicate::str::contains("quote")),
    );
}

#[test]
fn test_version_flag() {
    eway_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eway"));
}

#[test]
fn test_completions_bash() {
    eway_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let output = eway_cmd()
        .args(["quote", "--from", "colombo", "--to", "galle", "-o", "xml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Quote & routes ──────────────────────────────────────────────────

#[test]
fn test_quote_weekly_adult() {
    eway_cmd()
        .args(["quote", "--from", "colombo", "--to", "galle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LKR 2,000"));
}

#[test]
fn test_quote_monthly_student_plain() {
    eway_cmd()
        .args([
            "quote", "--from", "kandy", "--to", "colombo", "-d", "month", "--category", "student",
            "-o", "plain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("3600\n"));
}

#[test]
fn test_quote_with_start_shows_window() {
    eway_cmd()
        .args([
            "quote", "--from", "galle", "--to", "kalutara", "-d", "month", "--start",
            "2025-01-31",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-31 to 2025-02-27"));
}

#[test]
fn test_quote_same_endpoints_is_usage_error() {
    let output = eway_cmd()
        .args(["quote", "--from", "galle", "--to", "galle"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Galle"));
}

#[test]
fn test_routes_search() {
    eway_cmd()
        .args(["routes", "list", "--search", "kandy"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Colombo - Kandy").and(predicate::str::contains("Galle").not()),
        );
}

#[test]
fn test_routes_fares_json() {
    let output = eway_cmd()
        .args(["routes", "fares", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let fares: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(fares.as_array().map(Vec::len), Some(6));
}

// ── Verify & export ─────────────────────────────────────────────────

#[test]
fn test_verify_active_pass() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path());
    eway_cmd()
        .args(["verify", &payload, "--on", "2025-01-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SP00000042").and(predicate::str::contains("ACTIVE")));
}

#[test]
fn test_verify_expired_pass_fails() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path());
    let output = eway_cmd()
        .args(["verify", &payload, "--on", "2025-01-17"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("EXPIRED"));
}

#[test]
fn test_verify_from_stdin() {
    eway_cmd()
        .args(["verify", "-", "--on", "2025-01-12", "-o", "plain"])
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout(predicate::str::diff("ACTIVE\n"));
}

#[test]
fn test_verify_rejects_garbage() {
    let output = eway_cmd()
        .args(["verify", "-"])
        .write_stdin("not a pass")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_export_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let payload = write_payload(dir.path());
    let out = dir.path().join("pdfs");
    eway_cmd()
        .args(["export", &payload, "-O"])
        .arg(&out)
        .assert()
        .success();

    let pdf = std::fs::read(out.join("SeasonPass_SP00000042.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    eway_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults() {
    eway_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_unknown_profile() {
    let output = eway_cmd()
        .args(["--profile", "nope", "buy", "--no-input", "--offline"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

// ── Buy ─────────────────────────────────────────────────────────────

#[test]
fn test_buy_offline_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let payload_out = dir.path().join("out").join("pass.json");

    eway_cmd()
        .args([
            "buy", "--no-input", "--offline", "--yes", "--name", "Nimal Perera", "--category",
            "adult", "--id-photo", &photo, "--from", "colombo", "--to", "kandy", "-d", "week",
            "--start", "2099-01-01", "--payment", "card", "-o", "json",
        ])
        .arg("--pdf-dir")
        .arg(dir.path())
        .arg("--payload-out")
        .arg(&payload_out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"endDate\": \"2099-01-07\""));

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&payload_out).unwrap()).unwrap();
    assert_eq!(payload["price"], 1800);
    assert_eq!(payload["payment"], "card");
    assert_eq!(payload["status"], "ACTIVE");

    let ticket_id = payload["ticketId"].as_str().unwrap();
    assert!(dir.path().join(format!("SeasonPass_{ticket_id}.pdf")).exists());
}

#[test]
fn test_buy_without_name_is_usage_error() {
    let output = eway_cmd()
        .args(["buy", "--no-input", "--offline", "--yes"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("name"));
}

#[test]
fn test_buy_student_without_document_is_usage_error() {
    let output = eway_cmd()
        .args([
            "buy", "--no-input", "--offline", "--yes", "--name", "Kamala", "--category", "student",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_buy_needs_yes_without_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let output = eway_cmd()
        .args([
            "buy", "--no-input", "--offline", "--name", "Nimal", "--category", "adult",
            "--id-photo", &photo, "--start", "2099-01-01", "--payment", "ezcash",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buy_saves_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/saveTicket"))
        .and(body_partial_json(json!({ "name": "Nimal", "payment": "ezcash" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "message": "Ticket saved" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        eway_cmd()
            .args([
                "buy", "--no-input", "--yes", "--backend", &uri, "--name", "Nimal", "--category",
                "adult", "--id-photo", &photo, "--start", "2099-01-01", "--payment", "ezcash",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Ticket saved"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buy_rejected_save_keeps_artifacts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/saveTicket"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "dup" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let payload_out = dir.path().join("pass.json");
    let pdf_dir = dir.path().join("pdfs");
    let uri = server.uri();

    let output = {
        let payload_out = payload_out.clone();
        let pdf_dir = pdf_dir.clone();
        tokio::task::spawn_blocking(move || {
            eway_cmd()
                .args([
                    "buy", "--no-input", "--yes", "--backend", &uri, "--name", "Nimal Perera",
                    "--category", "adult", "--id-photo", &photo, "--from", "colombo", "--to",
                    "galle", "--start", "2099-01-01", "--payment", "card",
                ])
                .arg("--pdf-dir")
                .arg(&pdf_dir)
                .arg("--payload-out")
                .arg(&payload_out)
                .output()
                .unwrap()
        })
        .await
        .unwrap()
    };

    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("dup"));

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&payload_out).unwrap()).unwrap();
    let ticket_id = payload["ticketId"].as_str().unwrap();
    assert!(pdf_dir.join(format!("SeasonPass_{ticket_id}.pdf")).exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains(ticket_id));
}

#[test]
fn test_buy_unreachable_backend_keeps_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let payload_out = dir.path().join("pass.json");

    let output = eway_cmd()
        .args([
            "buy", "--no-input", "--yes", "--backend", "http://127.0.0.1:9", "--name", "Nimal",
            "--category", "adult", "--id-photo", &photo, "--start", "2099-01-01", "--payment",
            "card",
        ])
        .arg("--payload-out")
        .arg(&payload_out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("could not be saved"));
    assert!(payload_out.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_buy_saves_to_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "role": "user",
            "token": "tok"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/saveTicket"))
        .and(body_partial_json(json!({
            "name": "Nimal Perera",
            "startLocation": "Galle",
            "endLocation": "Colombo",
            "price": 2000,
            "payment": "ezcash",
            "createdBy": 1
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "message": "Ticket saved" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo = write_id_photo(dir.path());
    let uri = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        eway_cmd()
            .args([
                "buy", "--no-input", "--yes", "--backend", &uri, "--email", "nimal@example.com",
                "--password", "secret", "--name", "Nimal Perera", "--category", "adult",
                "--id-photo", &photo, "--from", "galle", "--to", "colombo", "--start",
                "2099-01-01", "--payment", "ezcash",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Ticket saved"));
}

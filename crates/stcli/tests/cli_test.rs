//! End-to-end tests for the `stcli` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command with a clean environment: no inherited token or config file.
fn stcli(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("stcli").unwrap();
    cmd.env_remove("SMARTTHINGS_TOKEN")
        .env_remove("STCLI_PROFILE")
        .env_remove("STCLI_URL")
        .env("HOME", config_dir)
        .env("XDG_CONFIG_HOME", config_dir.join(".config"));
    cmd
}

#[test]
fn help_lists_resources() {
    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("locations"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn missing_token_is_an_auth_failure() {
    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["locations"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No access token configured"));
}

#[test]
fn completions_generate() {
    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stcli"));
}

#[test]
fn config_show_redacts_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".config").join("stcli");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "default_profile = \"home\"\n\n[profiles.home]\ntoken = \"super-secret\"\n",
    )
    .unwrap();

    stcli(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[profiles.home]"))
        .stdout(predicate::str::contains("****"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn locations_list_renders_json_when_piped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/locations"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"locationId": "f9a0fbbc-8de5-4b27-8b8b-6e25e6a25c17", "name": "Office"},
                {"locationId": "6f2dbd7e-3c63-4e23-ba92-bc53a1a52a3b", "name": "home"}
            ]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = stcli(dir.path())
        .args(["locations", "--token", "test-token", "--url", &server.uri()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    // Sorted by name, case-insensitively: home before Office.
    assert_eq!(parsed[0]["name"], "home");
    assert_eq!(parsed[1]["name"], "Office");
}

#[tokio::test(flavor = "multi_thread")]
async fn index_argument_resolves_against_sorted_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"locationId": "loc-office", "name": "Office"},
                {"locationId": "loc-home", "name": "home"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/locations/loc-home"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locationId": "loc-home", "name": "home", "countryCode": "USA"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["locations", "1", "--token", "t", "--url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("loc-home"));
}

#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_index_is_a_usage_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"locationId": "loc-1", "name": "Home"}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["locations", "99", "--token", "t", "--url", &server.uri()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "invalid index 99 (enter an id or index between 1 and 1 inclusive)",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn verbose_device_listing_joins_location_and_room() {
    let location = "f9a0fbbc-8de5-4b27-8b8b-6e25e6a25c17";
    let room = "6f2dbd7e-3c63-4e23-ba92-bc53a1a52a3b";

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "deviceId": "0ad81b9e-59d8-4e0c-9714-5dbd45b6bb22",
                "label": "Lamp",
                "name": "lamp",
                "locationId": location,
                "roomId": room,
                "type": "VIRTUAL"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"locationId": location, "name": "Home"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/locations/{location}/rooms")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"roomId": room, "locationId": location, "name": "Kitchen"}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = stcli(dir.path())
        .args(["devices", "-v", "--token", "t", "--url", &server.uri()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["location"], "Home");
    assert_eq!(parsed[0]["room"], "Kitchen");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_device_list_prints_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["devices", "--token", "t", "--url", &server.uri()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no devices found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_echoes_input_without_calling_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/locations"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("location.json");
    std::fs::write(&input_path, r#"{"name": "Cabin", "countryCode": "USA"}"#).unwrap();

    stcli(dir.path())
        .args([
            "locations",
            "create",
            "--dry-run",
            "--input",
            input_path.to_str().unwrap(),
            "--token",
            "t",
            "--url",
            &server.uri(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cabin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_without_input_reports_missing_input() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["locations", "create", "--token", "t", "--url", &server.uri()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "input is required either via file specified with --input option or from stdin",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn webhook_app_with_authorize_is_rejected_before_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/apps"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("app.json");
    std::fs::write(
        &input_path,
        r#"{"appName": "hook", "appType": "WEBHOOK_SMART_APP",
           "webhookSmartApp": {"targetUrl": "https://example.com/hook"}}"#,
    )
    .unwrap();

    stcli(dir.path())
        .args([
            "apps",
            "create",
            "--authorize",
            "--input",
            input_path.to_str().unwrap(),
            "--token",
            "t",
            "--url",
            &server.uri(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Authorization is not applicable to WebHook SmartApps",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_envelope_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/locations/loc-x"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": "ForbiddenError", "message": "Operation denied"}
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    stcli(dir.path())
        .args(["locations", "loc-x", "--token", "t", "--url", &server.uri()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Operation denied"));
}

//! CLI smoke tests: argument parsing, robot-mode JSON output, and the
//! profile workflow end to end against a temporary store document.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

fn ltc(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ltc").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is valid JSON")
}

#[test]
fn quick_start_robot_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = ltc(&dir.path().join("store.json"))
        .arg("--robot")
        .output()
        .unwrap();
    assert!(output.status.success());

    let help = stdout_json(&output.stdout);
    assert_eq!(help["tool"], "ltc");
    assert!(help["profiles"]["create"].as_str().unwrap().contains("ltc init"));
}

#[test]
fn version_prints() {
    let dir = tempfile::tempdir().unwrap();
    ltc(&dir.path().join("store.json"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ltc "));
}

#[test]
fn init_show_list_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store)
        .args(["init", "Noticias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Noticias"));

    // Re-init without --force is refused
    ltc(&store)
        .args(["init", "Noticias"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let output = ltc(&store)
        .args(["show", "--list", "--robot"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listing = stdout_json(&output.stdout);
    assert_eq!(listing["profiles"], serde_json::json!(["Noticias"]));
}

#[test]
fn show_robot_emits_advanced_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();

    let output = ltc(&store)
        .args(["show", "Noticias", "--robot"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let record = stdout_json(&output.stdout);
    assert_eq!(record["name"], "Noticias");
    assert_eq!(record["config"]["layout"]["canvas"]["width"], 1920);
}

#[test]
fn set_edits_a_single_field() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();
    ltc(&store)
        .args(["set", "Noticias", "main_text.content", "Breaking news"])
        .assert()
        .success();
    ltc(&store)
        .args(["set", "Noticias", "main_text.visible", "true"])
        .assert()
        .success();

    let output = ltc(&store)
        .args(["show", "Noticias", "--robot"])
        .output()
        .unwrap();
    let record = stdout_json(&output.stdout);
    assert_eq!(record["config"]["main_text"]["content"], "Breaking news");
    assert_eq!(record["config"]["main_text"]["visible"], true);
}

#[test]
fn validate_reports_structured_findings() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();
    // Visible logo with no URL is a validation error
    ltc(&store)
        .args(["set", "Noticias", "logo.visible", "true"])
        .assert()
        .success();

    let output = ltc(&store)
        .args(["validate", "Noticias", "--robot"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = stdout_json(&output.stdout);
    assert_eq!(report["valid"], false);
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn scale_preview_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();

    // Preview does not persist
    ltc(&store)
        .args(["scale", "Noticias", "1280", "720"])
        .assert()
        .success();
    let output = ltc(&store)
        .args(["show", "Noticias", "--robot"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output.stdout)["config"]["layout"]["canvas"]["width"],
        1920
    );

    ltc(&store)
        .args(["scale", "Noticias", "1280", "720", "--save"])
        .assert()
        .success();
    let output = ltc(&store)
        .args(["show", "Noticias", "--robot"])
        .output()
        .unwrap();
    assert_eq!(
        stdout_json(&output.stdout)["config"]["layout"]["canvas"]["width"],
        1280
    );
}

#[test]
fn scale_rejects_zero_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();
    ltc(&store)
        .args(["scale", "Noticias", "0", "720"])
        .assert()
        .failure();
}

#[test]
fn export_targets() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    ltc(&store).args(["init", "Noticias"]).assert().success();

    let output = ltc(&store)
        .args(["export", "Noticias", "--target", "obs"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_json(&output.stdout)["obs_lower_third_config"].is_object());

    ltc(&store)
        .args(["export", "Noticias", "--target", "css"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".lower-third-container"));

    let output = ltc(&store)
        .args([
            "export",
            "Noticias",
            "--target",
            "web",
            "--base-url",
            "https://overlay.example",
        ])
        .output()
        .unwrap();
    let payload = stdout_json(&output.stdout);
    assert_eq!(
        payload["endpoints"]["visualization"],
        "https://overlay.example/view/Noticias"
    );
}

#[test]
fn migrate_upgrades_a_legacy_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    // Seed a legacy-only store document by hand
    std::fs::write(
        &store,
        serde_json::to_string_pretty(&serde_json::json!({
            "profiles": {
                "Noticias": {
                    "basic": {
                        "NombrePerfil": "Noticias",
                        "colorFondo1": "#1066FF",
                        "urlLogo": "https://x/a.png",
                        "Invitado": "Ana",
                    }
                }
            }
        }))
        .unwrap(),
    )
    .unwrap();

    let output = ltc(&store)
        .args(["migrate", "Noticias", "--robot"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let result = stdout_json(&output.stdout);
    assert_eq!(result["migrated"], "Noticias");
    assert_eq!(result["schema_version"], 2);

    let output = ltc(&store)
        .args(["show", "Noticias", "--robot"])
        .output()
        .unwrap();
    let record = stdout_json(&output.stdout);
    assert_eq!(record["guest"]["name"], "Ana");
    assert_eq!(record["config"]["logo"]["simple"]["url"], "https://x/a.png");
}

#[test]
fn missing_profile_error_is_structured_in_robot_mode() {
    let dir = tempfile::tempdir().unwrap();
    let output = ltc(&dir.path().join("store.json"))
        .args(["show", "Nadie", "--robot"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    // stderr carries JSON log lines plus the error document; check the
    // document's fields textually
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"error\": true"));
    assert!(stderr.contains("Nadie"));
}

#[test]
fn completions_generate() {
    let dir = tempfile::tempdir().unwrap();
    ltc(&dir.path().join("store.json"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ltc"));
}

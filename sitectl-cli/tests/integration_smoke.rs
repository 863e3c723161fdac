//! Smoke tests to verify command wiring

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn sitectl() -> Command {
    let mut cmd = Command::cargo_bin("sitectl").unwrap();
    // keep the developer's own config and env files out of the picture
    cmd.env("HOME", std::env::temp_dir().join("sitectl-smoke-home"))
        .env_remove("SITECTL_CONFIG")
        .env_remove("SITECTL_BIND")
        .env_remove("GOOGLE_MAPS_API_KEY");
    cmd
}

#[test]
fn test_top_level_help() {
    sitectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("image-url"));
}

#[test]
fn test_serve_help() {
    sitectl()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Allow permissive CORS"));
}

#[test]
fn test_fetch_help() {
    sitectl()
        .args(["fetch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Look the page up by slug"));
}

#[test]
fn test_fetch_requires_type_or_menu() {
    sitectl()
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--menu-title"));
}

#[test]
fn test_menus_help() {
    sitectl()
        .args(["menus", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Print the resolved menus as JSON"));
}

#[test]
fn test_image_url_from_ref() {
    sitectl()
        .args(["image-url", "image-abc123-2000x3000-jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://cdn.sanity.io/images/4dgj84d5/production/abc123-2000x3000.jpg",
        ));
}

#[test]
fn test_image_url_rejects_garbage() {
    sitectl()
        .args(["image-url", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an image asset reference"));
}

#[test]
fn test_config_show_defaults() {
    sitectl()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_id = \"4dgj84d5\""));
}

#[test]
fn test_config_file_and_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sanity]\ndataset = \"staging\"").unwrap();

    sitectl()
        .args(["config", "show", "--config"])
        .arg(file.path())
        .env("GOOGLE_MAPS_API_KEY", "maps-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("dataset = \"staging\""))
        .stdout(predicate::str::contains("google_maps_api_key = \"maps-key\""));
}

#[test]
fn test_config_validate_rejects_bad_project() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[sanity]\nproject_id = \"not valid!\"").unwrap();

    sitectl()
        .args(["config", "validate", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("project_id"));
}

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("schema_check_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn write_schema(dir: &TempDir, name: &str, json: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).expect("failed to write schema");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schema-check"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run schema-check")
}

fn clean_schema() -> serde_json::Value {
    serde_json::json!({
        "customTypes": { "Color": ["Red", "Blue"] },
        "properties": { "Tint": { "type": "@Color" } },
        "targets": { "Build": "Builds" }
    })
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_accepts_clean_schema() {
    let dir = TempDir::new("check_clean");
    let path = write_schema(&dir, "clean.json", clean_schema());

    let output = run(&["check", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("ok (2 entities, 0 warnings)"));
}

#[test]
fn check_fails_on_error_diagnostics() {
    let dir = TempDir::new("check_errors");
    let path = write_schema(
        &dir,
        "broken.json",
        serde_json::json!({ "properties": { "Tint": { "type": "@Missing" } } }),
    );

    let output = run(&["check", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("error: custom type 'Missing'"), "stdout: {stdout}");
}

#[test]
fn check_warnings_only_fail_when_denied() {
    let dir = TempDir::new("check_warnings");
    let path = write_schema(&dir, "warn.json", serde_json::json!({ "extra": true }));
    let path = path.to_str().unwrap();

    assert!(run(&["check", path]).status.success());
    assert!(!run(&["check", "--deny-warnings", path]).status.success());
}

#[test]
fn check_reports_fatal_errors() {
    let dir = TempDir::new("check_fatal");
    let path = write_schema(
        &dir,
        "fatal.json",
        serde_json::json!({ "customTypes": { "foo--bar": ["a"] } }),
    );

    let output = run(&["check", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!output.status.success());
    assert!(stdout.contains("fatal: invalid custom type name 'foo--bar'"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// dump
// ---------------------------------------------------------------------------

#[test]
fn dump_prints_model_json() {
    let dir = TempDir::new("dump");
    let path = write_schema(&dir, "schema.json", clean_schema());

    let output = run(&["dump", "--compact", path.to_str().unwrap()]);
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["model"]["targets"]["Build"]["description"], "Builds");
    assert_eq!(
        document["model"]["properties"]["Tint"]["custom_type"]["name"],
        "Color"
    );
    assert_eq!(document["diagnostics"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_composes_listed_schemas() {
    let dir = TempDir::new("catalog");
    write_schema(&dir, "a.json", clean_schema());
    write_schema(
        &dir,
        "b.json",
        serde_json::json!({ "items": { "Compile": { "description": "Sources" } } }),
    );
    let catalog = dir.join("catalog.yml");
    fs::write(&catalog, "version: \"1.0\"\nschemas:\n  - a.json\n  - b.json\n").unwrap();

    let output = run(&["catalog", catalog.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("2 schemas composed: 1 properties, 1 items, 1 targets, 0 errors, 0 warnings"));
}

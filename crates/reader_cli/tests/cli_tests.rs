use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the vread binary
#[allow(deprecated)]
fn vread() -> Command {
    Command::cargo_bin("vread").expect("Failed to find vread binary")
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_valid_request() {
    vread()
        .arg("check")
        .arg(fixture_path("passing_request.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("allocated_collateral"))
        .stdout(predicate::str::contains("4 columns"))
        .stdout(predicate::str::contains("collateral_id, currency"));
}

#[test]
fn test_check_toml_request() {
    vread()
        .arg("check")
        .arg(fixture_path("request.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("collateral_toml"))
        .stdout(predicate::str::contains("sep = ,"));
}

#[test]
fn test_check_invalid_request() {
    vread()
        .arg("check")
        .arg(fixture_path("invalid_request.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain 2 values"));
}

#[test]
fn test_check_missing_file() {
    vread()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// run command tests
// ============================================================================

#[test]
fn test_run_passing_request() {
    vread()
        .arg("run")
        .arg(fixture_path("passing_request.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("Rows:           3"));
}

#[test]
fn test_run_toml_request() {
    vread()
        .arg("run")
        .arg(fixture_path("request.toml"))
        .assert()
        .success();
}

#[test]
fn test_run_failing_request_collects_errors() {
    vread()
        .arg("run")
        .arg(fixture_path("failing_request.yml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("Total errors:   3"))
        .stdout(predicate::str::contains("contain null values"))
        .stdout(predicate::str::contains("Data has duplicates"));
}

#[test]
fn test_run_fail_fast_stops_at_schema() {
    vread()
        .arg("run")
        .arg("--fail-fast")
        .arg(fixture_path("failing_request.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Did not get the same data types for the columns",
        ));
}

#[test]
fn test_run_schema_only_skips_data_checks() {
    vread()
        .arg("run")
        .arg("--schema-only")
        .arg(fixture_path("passing_request.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped non-nullable check"))
        .stdout(predicate::str::contains("Skipped unique check"));
}

#[test]
fn test_run_json_output() {
    let output = vread()
        .arg("run")
        .arg("--format")
        .arg("json")
        .arg(fixture_path("passing_request.yml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let output_str = String::from_utf8_lossy(&output);

    // Info lines come before the JSON report
    let json_start = output_str.find('{').expect("Should contain JSON object");
    let report: serde_json::Value =
        serde_json::from_str(&output_str[json_start..]).expect("Output should be valid JSON");

    assert_eq!(report["passed"], serde_json::Value::Bool(true));
    assert_eq!(report["stats"]["rows"], serde_json::json!(3));
    assert_eq!(report["checks"].as_array().map(Vec::len), Some(3));
}

#[test]
fn test_run_missing_data() {
    let temp_dir = TempDir::new().unwrap();
    let request_path = temp_dir.path().join("missing.yml");
    fs::write(&request_path, "location: nowhere.csv\nformat: csv\n").unwrap();

    vread()
        .arg("run")
        .arg(&request_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn test_run_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let request_path = temp_dir.path().join("delta.toml");
    fs::write(
        &request_path,
        "location = \"s3://lake/collateral\"\nformat = \"delta\"\n",
    )
    .unwrap();

    vread()
        .arg("run")
        .arg(&request_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported"));
}

// ============================================================================
// single-check command tests
// ============================================================================

#[test]
fn test_read_prints_dtypes() {
    vread()
        .arg("read")
        .arg(fixture_path("collateral.csv"))
        .arg("-o")
        .arg("header=true")
        .assert()
        .success()
        .stdout(predicate::str::contains("collateral_id"))
        .stdout(predicate::str::contains("bigint"))
        .stdout(predicate::str::contains("Rows: 3"));
}

#[test]
fn test_read_rejects_malformed_option() {
    vread()
        .arg("read")
        .arg(fixture_path("collateral.csv"))
        .arg("-o")
        .arg("header")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));
}

#[test]
fn test_schema_per_column() {
    vread()
        .args(["schema", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "collateral_id:bigint", "-c", "counterparty:string"])
        .args(["-c", "amount:bigint", "-c", "currency:string"])
        .arg("--per-column")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema matches"));
}

#[test]
fn test_schema_missing_column() {
    vread()
        .args(["schema", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "collateral_id:bigint", "-c", "isin:string"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Did not get the columns as specified in the schema",
        ));
}

#[test]
fn test_not_null() {
    vread()
        .args(["not-null", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "collateral_id", "-c", "currency"])
        .assert()
        .success();

    vread()
        .args(["not-null", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "amount"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount"));
}

#[test]
fn test_unique() {
    vread()
        .args(["unique", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "collateral_id", "-c", "counterparty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found"));

    vread()
        .args(["unique", &fixture_path("collateral.csv"), "-o", "header=true"])
        .args(["-c", "collateral_id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data has duplicates"));
}

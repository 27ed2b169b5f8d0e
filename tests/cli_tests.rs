// CLI integration tests: report output, exit status, and no files on error

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const UPLIFT_CSV: &str = "group,revenue\n\
A,10\nA,10\nA,10\nA,12\n\
B,12\nB,12\nB,12\nB,14\n";

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_markdown_report_written_and_printed() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "500"])
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("# A/B Test Summary"))
        .stdout(predicate::str::contains("SIGNIFICANT ✅"))
        .stdout(predicate::str::contains("19.05%"))
        .stdout(predicate::str::contains("Saved report →"));

    let report = fs::read_to_string(&out).unwrap();
    assert!(report.contains("**Metric:** `revenue`"));
    assert!(report.contains("Bootstrap 95% CI for lift"));
}

#[test]
fn test_json_report() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue"])
        .args(["--format", "json", "--bootstrap", "300", "--seed", "9"])
        .arg("--out")
        .arg(&out);
    cmd.assert().success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["group_a_mean"], 10.5);
    assert_eq!(value["n_boot"], 300);
    assert_eq!(value["seed"], 9);
}

#[test]
fn test_dashboard_panel_written() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");
    let dashboard = tmp_dir.path().join("dashboard.txt");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "200"])
        .arg("--out")
        .arg(&out)
        .arg("--dashboard")
        .arg(&dashboard);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Saved dashboard →"));

    let panel = fs::read_to_string(&dashboard).unwrap();
    assert!(panel.contains("Total Rows: 8"));
    assert!(panel.contains("Lift (B vs A): 19.05%"));
}

#[test]
fn test_three_groups_fails_without_writing() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", "group,revenue\nA,1\nB,2\nC,3\n");
    let out = tmp_dir.path().join("summary.md");
    let dashboard = tmp_dir.path().join("dashboard.txt");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue"])
        .arg("--out")
        .arg(&out)
        .arg("--dashboard")
        .arg(&dashboard);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Expected exactly 2 groups"))
        .stderr(predicate::str::contains("found 3"));

    assert!(!out.exists());
    assert!(!dashboard.exists());
}

#[test]
fn test_report_write_failure_leaves_no_dashboard() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("missing_dir").join("summary.md");
    let dashboard = tmp_dir.path().join("dashboard.txt");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "100"])
        .arg("--out")
        .arg(&out)
        .arg("--dashboard")
        .arg(&dashboard);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write"));

    assert!(!out.exists());
    assert!(!dashboard.exists());
}

#[test]
fn test_dashboard_write_failure_leaves_no_report() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");
    let dashboard = tmp_dir.path().join("missing_dir").join("dashboard.txt");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "100"])
        .arg("--out")
        .arg(&out)
        .arg("--dashboard")
        .arg(&dashboard);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write"));

    assert!(!out.exists());
    assert!(!dashboard.exists());
}

#[test]
fn test_lone_cr_input_is_analyzed() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", &UPLIFT_CSV.replace('\n', "\r"));
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "200"])
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("19.05%"));
}

#[test]
fn test_missing_column_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "variant", "--metric", "revenue"])
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing required columns: variant"));
    assert!(!out.exists());
}

#[test]
fn test_invalid_winsor_rejected() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--winsor", "0.5"])
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("winsor must be in [0, 0.5)"));
    assert!(!out.exists());
}

#[test]
fn test_missing_input_file() {
    let tmp_dir = TempDir::new().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(tmp_dir.path().join("nope.csv"))
        .args(["--group", "group", "--metric", "revenue"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn test_config_file_applied() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let config = write_csv(&tmp_dir, "abtest.toml", "alpha = 0.01\nn_boot = 400\n");
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue"])
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap 99% CI for lift"))
        .stdout(predicate::str::contains("**Bootstrap:** 400"));
}

#[test]
fn test_debug_flag_emits_tracing() {
    let tmp_dir = TempDir::new().unwrap();
    let csv = write_csv(&tmp_dir, "data.csv", UPLIFT_CSV);
    let out = tmp_dir.path().join("summary.md");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("abtest");
    cmd.arg(&csv)
        .args(["--group", "group", "--metric", "revenue", "--bootstrap", "100", "--debug"])
        .arg("--out")
        .arg(&out);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Assigned groups"));
}

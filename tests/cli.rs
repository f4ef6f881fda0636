use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn calc_one_year_at_half_c() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "50", "--years", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Velocity: 50% of c (299.792458 Million m/s)",
        ))
        .stdout(predicate::str::contains("Gamma factor: 1.1547005383792515"))
        .stdout(predicate::str::contains("  (31.5576 Million seconds)"));
}

#[test]
fn calc_distance_in_light_years() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "99", "--distance", "4.25", "--unit", "ly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 4.25 light years"))
        .stdout(predicate::str::contains("Gamma factor: 7.0888120500833590"));
}

#[test]
fn calc_accepts_micro_unit_spellings() {
    for unit in ["μm/s", "um/s"] {
        let mut cmd = cargo_bin_cmd!("dilation");
        cmd.args(["calc", "--velocity", "50", "--years", "1", "--c-unit", unit])
            .assert()
            .success()
            .stdout(predicate::str::contains("299.792458 Trillion μm/s"));
    }
}

#[test]
fn calc_rejects_bad_velocity() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "fast", "--years", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter a valid number for velocity",
        ));
}

#[test]
fn calc_reports_rejection_once() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.env_remove("RUST_LOG")
        .args(["calc", "--velocity", "50", "--years", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Time must be positive"))
        .stderr(predicate::str::contains("calculation rejected").not());
}

#[test]
fn calc_rejects_velocity_near_c() {
    let velocity = format!("99.{}", "9".repeat(199));
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", &velocity, "--years", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Velocity is too close to the speed of light",
        ));
}

#[test]
fn calc_rejects_unknown_unit() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "50", "--years", "1", "--c-unit", "furlongs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported unit: furlongs"));
}

#[test]
fn calc_needs_years_or_distance() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "50"]).assert().failure();

    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "50", "--years", "1", "--distance", "2"])
        .assert()
        .failure();
}

#[test]
fn precision_below_minimum_is_rejected() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["--precision", "50", "calc", "--velocity", "50", "--years", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn precision_above_maximum_is_rejected() {
    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["--precision", "2147483650", "calc", "--velocity", "50", "--years", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn sweep_writes_csv_and_plot() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("sweep.csv");
    let plot = dir.path().join("sweep.svg");

    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["sweep", "--steps", "10", "--csv"])
        .arg(&csv)
        .arg("--plot")
        .arg(&plot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Metrics written to"));

    let text = fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("velocity_percent,gamma,earth_seconds,traveler_seconds,traveler_years")
    );
    assert_eq!(lines.count(), 9);
    assert!(fs::read_to_string(&plot).unwrap().contains("<svg"));
}

#[test]
fn log_file_receives_structured_logs() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("dilation.log");

    let mut cmd = cargo_bin_cmd!("dilation");
    cmd.args(["calc", "--velocity", "50", "--years", "1", "-v", "--log-file"])
        .arg(&log)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Calculation completed"));
    assert!(!contents.contains('\u{1b}'));
}

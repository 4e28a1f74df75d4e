use std::{fs, path::Path};

use assert_cmd::Command;
use tempfile::TempDir;

const CONTROLS: &str = "
controls:
  - name: CTRL-POS
    expectations:
      - metric: number_of_reads
        rule: { at_least: 100000 }
  - name: CTRL-NEG
    expectations:
      - metric: percent_ns
        rule: { at_most: 5.0 }
";

fn ctrlqc(root: &Path) -> Command {
    let mut command = Command::cargo_bin("ctrlqc").unwrap();
    command
        .current_dir(root)
        .arg("--settings")
        .arg(root.join("ctrlqc.json"))
        .arg("--logs")
        .arg(root.join("logs/ctrlqc.log"));
    command
}

fn write_run(root: &Path, qc: &str) {
    fs::write(
        root.join("sample_sheet.csv"),
        "barcode,alias\nbarcode01,CTRL-POS_barcode01\nbarcode02,CTRL-NEG_barcode02\n",
    )
    .unwrap();
    fs::write(root.join("RUN9.csv"), qc).unwrap();
    fs::write(root.join("controls.yaml"), CONTROLS).unwrap();
    ctrlqc(root)
        .args(["init", "."])
        .args(["--run-id", "RUN9"])
        .args(["--qc-directory", "."])
        .args(["--controls", "controls.yaml"])
        .assert()
        .success();
}

#[test]
fn passing_run_exits_successfully() {
    let directory = TempDir::new().unwrap();
    write_run(
        directory.path(),
        "barcode,num_aligned_reads,pct_N_bases\n01,500000,0.2\n02,0,1.0\n",
    );

    let output = ctrlqc(directory.path()).arg("check").assert().success().get_output().clone();

    assert_eq!(String::from_utf8(output.stdout).unwrap(), "QC PASSED (2 checks)\n");
}

#[test]
fn missing_qc_row_fails_the_run() {
    let directory = TempDir::new().unwrap();
    write_run(directory.path(), "barcode,num_aligned_reads,pct_N_bases\n01,500000,0.2\n");

    let output = ctrlqc(directory.path())
        .args(["check", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(
        json["outcomes"][1]["description"],
        "CTRL-NEG: percent_ns <= 5 (observed 100.00%)"
    );
}

#[test]
fn init_refuses_to_overwrite_settings() {
    let directory = TempDir::new().unwrap();
    write_run(directory.path(), "barcode,num_aligned_reads,pct_N_bases\n");

    ctrlqc(directory.path())
        .args(["init", ".", "--run-id", "RUN9", "--qc-directory", ".", "--controls", "c.yaml"])
        .assert()
        .failure();
}

#[test]
fn check_runs_from_another_directory() {
    let directory = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    write_run(
        directory.path(),
        "barcode,num_aligned_reads,pct_N_bases\n01,500000,0.2\n02,0,1.0\n",
    );

    let settings = fs::read_to_string(directory.path().join("ctrlqc.json")).unwrap();
    let settings: serde_json::Value = serde_json::from_str(&settings).unwrap();
    assert!(Path::new(settings["controls_file"].as_str().unwrap()).is_absolute());

    Command::cargo_bin("ctrlqc")
        .unwrap()
        .current_dir(elsewhere.path())
        .arg("--settings")
        .arg(directory.path().join("ctrlqc.json"))
        .arg("--logs")
        .arg(elsewhere.path().join("ctrlqc.log"))
        .arg("check")
        .assert()
        .success();
}

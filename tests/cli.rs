#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_inputs(dir: &Path, roster: &str) {
    fs::write(dir.join("azubis.csv"), roster).unwrap();
    fs::write(
        dir.join("blockwochen.csv"),
        "Jahr;Lehrjahr;Kalenderwoche\n2025;1;37\n",
    )
    .unwrap();
    fs::write(dir.join("feiertage.csv"), "Datum\n03.10.2025\n").unwrap();
}

#[allow(deprecated)]
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("corvee-cli").unwrap();
    cmd.current_dir(dir)
        .arg("--roster")
        .arg(dir.join("azubis.csv"))
        .arg("--block-weeks")
        .arg(dir.join("blockwochen.csv"))
        .arg("--holidays")
        .arg(dir.join("feiertage.csv"));
    cmd
}

const ROSTER: &str = "Vorname;Nachname;Lehrjahr;Ignorieren\n\
                      Anna;Alpha;1;\n\
                      Ben;Beta;1;\n\
                      Carl;Gamma;2;\n";

#[test]
fn generate_writes_schedule_and_monthly_files() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), ROSTER);
    let out = dir.path().join("plan.csv");

    cli(dir.path())
        .args(["generate", "--year", "2025", "--out"])
        .arg(&out)
        .arg("--monthly-dir")
        .arg(dir.path().join("monthly"))
        .assert()
        .success()
        .stdout(contains("Anna Alpha"))
        .stdout(contains("2025-09-01"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("datum;dienst;vertretung\n01.09.2025;Anna Alpha;"));
    assert!(!written.contains("03.10.2025"));
    assert!(dir.path().join("monthly").join("2025_09.csv").exists());
    assert!(dir.path().join("monthly").join("2026_07.csv").exists());
    assert!(!dir.path().join("monthly").join("2026_08.csv").exists());
}

#[test]
fn check_reports_ok() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), ROSTER);
    cli(dir.path())
        .args(["check", "--year", "2025"])
        .assert()
        .success()
        .stdout(contains("OK"));
}

#[test]
fn stats_lists_everyone_and_honours_exclusions() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), ROSTER);
    let assert = cli(dir.path())
        .args(["--exclude", "Anna Alpha", "stats", "--year", "2025"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let anna = stdout
        .lines()
        .find(|l| l.contains("Anna Alpha"))
        .expect("Anna listed");
    let counts: Vec<&str> = anna.split_whitespace().collect();
    // cohort, prénom, nom, titulaire, remplaçant
    assert_eq!(counts[3], "0");
    assert!(stdout.contains("Carl Gamma"));
}

#[test]
fn malformed_roster_fails_before_generation() {
    let dir = tempdir().unwrap();
    write_inputs(
        dir.path(),
        "Vorname;Nachname;Lehrjahr;Ignorieren\nAnna;Alpha;eins;\n",
    );
    cli(dir.path())
        .args(["generate", "--year", "2025"])
        .assert()
        .failure()
        .stderr(contains("Lehrjahr"))
        .stderr(contains("line 2"));
}

#![forbid(unsafe_code)]
use chrono::NaiveDate;
use corvee::io::{load_roster_csv, read_block_weeks, read_holidays, read_roster};
use corvee::{DataLoadError, Person};
use std::fs;
use tempfile::tempdir;

#[test]
fn roster_skips_ignored_rows_and_bom() {
    let csv = "\u{feff}Vorname;Nachname;Lehrjahr;Ignorieren\n\
               Anna;Alpha;1;\n\
               Ben;Beta;2;x\n\
               Carl;Gamma;3;\n";
    let people = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(
        people,
        vec![Person::new("Anna", "Alpha", 1), Person::new("Carl", "Gamma", 3)]
    );
}

#[test]
fn roster_error_names_line_and_field() {
    let csv = "Vorname;Nachname;Lehrjahr;Ignorieren\nAnna;Alpha;1;\nBen;Beta;zwei;\n";
    let err = read_roster(csv.as_bytes()).unwrap_err();
    match &err {
        DataLoadError::InvalidField { line, field, value, .. } => {
            assert_eq!(*line, 3);
            assert_eq!(*field, "Lehrjahr");
            assert_eq!(value, "zwei");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn roster_rejects_zero_cohort_and_missing_columns() {
    let zero = "Vorname;Nachname;Lehrjahr;Ignorieren\nAnna;Alpha;0;\n";
    assert!(matches!(
        read_roster(zero.as_bytes()),
        Err(DataLoadError::InvalidField { field: "Lehrjahr", .. })
    ));

    let missing = "Vorname;Nachname;Lehrjahr\nAnna;Alpha;1\n";
    assert!(matches!(
        read_roster(missing.as_bytes()),
        Err(DataLoadError::MissingColumn { column: "Ignorieren", .. })
    ));
}

#[test]
fn block_weeks_are_indexed() {
    let csv = "Jahr;Lehrjahr;Kalenderwoche\n2025;1;38\n2025;1;39\n2026;2;3\n";
    let index = read_block_weeks(csv.as_bytes()).unwrap();
    assert_eq!(index.len(), 3);
    assert!(index.contains(2025, 39, 1));
    assert!(index.contains(2026, 3, 2));
    assert!(!index.contains(2026, 3, 1));

    let bad = "Jahr;Lehrjahr;Kalenderwoche\n2025;1;54\n";
    assert!(matches!(
        read_block_weeks(bad.as_bytes()),
        Err(DataLoadError::InvalidField { field: "Kalenderwoche", line: 2, .. })
    ));
}

#[test]
fn holidays_accept_german_and_iso_dates() {
    let csv = "Datum\n03.10.2025\n2025-12-25\n";
    let holidays = read_holidays(csv.as_bytes()).unwrap();
    assert!(holidays.contains(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap()));
    assert!(holidays.contains(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));

    let bad = "Datum\n31.02.2025\n";
    let err = read_holidays(bad.as_bytes()).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidField { field: "Datum", line: 2, .. }));
}

#[test]
fn load_from_path_reports_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("azubis.csv");
    assert!(matches!(load_roster_csv(&path), Err(DataLoadError::Open { .. })));

    fs::write(&path, "Vorname;Nachname;Lehrjahr;Ignorieren\nAnna;Alpha;2;\n").unwrap();
    let people = load_roster_csv(&path).unwrap();
    assert_eq!(people[0].full_name(), "Anna Alpha");
    assert_eq!(people[0].cohort, 2);
}

use crate::model::{BlockWeek, BlockWeekIndex, HolidaySet, Person};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Erreur de chargement des tableaux d'entrée : ligne et champ fautifs.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("{table}: cannot open {path}: {source}")]
    Open {
        table: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("{table}: missing column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table}, line {line}: invalid `{field}` value {value:?}: {reason}")]
    InvalidField {
        table: &'static str,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}

const ROSTER: &str = "roster";
const BLOCK_WEEKS: &str = "block weeks";
const HOLIDAYS: &str = "holidays";

/// Colonnes résolues par nom dans l'en-tête d'un tableau.
struct Columns {
    table: &'static str,
    headers: StringRecord,
}

impl Columns {
    fn index(&self, column: &'static str) -> Result<usize, DataLoadError> {
        self.headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
            .ok_or(DataLoadError::MissingColumn {
                table: self.table,
                column,
            })
    }
}

fn reader<R: std::io::Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr)
}

fn open(table: &'static str, path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Open {
        table,
        path: path.display().to_string(),
        source,
    })
}

fn line_of(rec: &StringRecord) -> u64 {
    rec.position().map_or(0, |p| p.line())
}

fn field<'r>(
    table: &'static str,
    rec: &'r StringRecord,
    idx: usize,
    name: &'static str,
) -> Result<&'r str, DataLoadError> {
    match rec.get(idx) {
        Some(v) if !v.is_empty() => Ok(v),
        other => Err(DataLoadError::InvalidField {
            table,
            line: line_of(rec),
            field: name,
            value: other.unwrap_or_default().to_string(),
            reason: "empty".to_string(),
        }),
    }
}

fn parse_number<T>(
    table: &'static str,
    rec: &StringRecord,
    idx: usize,
    name: &'static str,
) -> Result<T, DataLoadError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(table, rec, idx, name)?;
    raw.parse::<T>().map_err(|err| DataLoadError::InvalidField {
        table,
        line: line_of(rec),
        field: name,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

/// Roster : en-tête `Vorname;Nachname;Lehrjahr;Ignorieren`.
///
/// Les lignes dont `Ignorieren` n'est pas vide sont écartées.
pub fn read_roster<R: std::io::Read>(rdr: R) -> Result<Vec<Person>, DataLoadError> {
    let mut rdr = reader(rdr);
    let cols = Columns {
        table: ROSTER,
        headers: rdr.headers()?.clone(),
    };
    let first = cols.index("Vorname")?;
    let last = cols.index("Nachname")?;
    let cohort = cols.index("Lehrjahr")?;
    let ignore = cols.index("Ignorieren")?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.get(ignore).is_some_and(|v| !v.is_empty()) {
            debug!(line = line_of(&rec), "roster row ignored");
            continue;
        }
        let first_name = field(ROSTER, &rec, first, "Vorname")?;
        let last_name = field(ROSTER, &rec, last, "Nachname")?;
        let year: u32 = parse_number(ROSTER, &rec, cohort, "Lehrjahr")?;
        if year == 0 {
            return Err(DataLoadError::InvalidField {
                table: ROSTER,
                line: line_of(&rec),
                field: "Lehrjahr",
                value: year.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        out.push(Person::new(first_name, last_name, year));
    }
    Ok(out)
}

/// Semaines d'école : en-tête `Jahr;Lehrjahr;Kalenderwoche`.
pub fn read_block_weeks<R: std::io::Read>(rdr: R) -> Result<BlockWeekIndex, DataLoadError> {
    let mut rdr = reader(rdr);
    let cols = Columns {
        table: BLOCK_WEEKS,
        headers: rdr.headers()?.clone(),
    };
    let year_col = cols.index("Jahr")?;
    let cohort_col = cols.index("Lehrjahr")?;
    let week_col = cols.index("Kalenderwoche")?;

    let mut index = BlockWeekIndex::new();
    for rec in rdr.records() {
        let rec = rec?;
        let iso_week: u32 = parse_number(BLOCK_WEEKS, &rec, week_col, "Kalenderwoche")?;
        if !(1..=53).contains(&iso_week) {
            return Err(DataLoadError::InvalidField {
                table: BLOCK_WEEKS,
                line: line_of(&rec),
                field: "Kalenderwoche",
                value: iso_week.to_string(),
                reason: "ISO week must be within 1..=53".to_string(),
            });
        }
        index.insert(BlockWeek {
            year: parse_number(BLOCK_WEEKS, &rec, year_col, "Jahr")?,
            cohort: parse_number(BLOCK_WEEKS, &rec, cohort_col, "Lehrjahr")?,
            iso_week,
        });
    }
    Ok(index)
}

/// Jours fériés/fermetures : en-tête `Datum`, format `JJ.MM.AAAA` (ou ISO).
pub fn read_holidays<R: std::io::Read>(rdr: R) -> Result<HolidaySet, DataLoadError> {
    let mut rdr = reader(rdr);
    let cols = Columns {
        table: HOLIDAYS,
        headers: rdr.headers()?.clone(),
    };
    let date = cols.index("Datum")?;

    let mut out = HolidaySet::new();
    for rec in rdr.records() {
        let rec = rec?;
        let raw = field(HOLIDAYS, &rec, date, "Datum")?;
        let parsed = parse_date(raw).map_err(|err| DataLoadError::InvalidField {
            table: HOLIDAYS,
            line: line_of(&rec),
            field: "Datum",
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
        out.insert(parsed);
    }
    Ok(out)
}

fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, "%d.%m.%Y").or_else(|err| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| err)
    })
}

pub fn load_roster_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Person>, DataLoadError> {
    read_roster(open(ROSTER, path.as_ref())?)
}

pub fn load_block_weeks_csv<P: AsRef<Path>>(path: P) -> Result<BlockWeekIndex, DataLoadError> {
    read_block_weeks(open(BLOCK_WEEKS, path.as_ref())?)
}

pub fn load_holidays_csv<P: AsRef<Path>>(path: P) -> Result<HolidaySet, DataLoadError> {
    read_holidays(open(HOLIDAYS, path.as_ref())?)
}

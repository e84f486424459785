use crate::model::DutyAssignment;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;

/// Rendu d'un planning vers un format de fichier (CSV, ICS, JSON...).
pub trait ScheduleExporter {
    /// Extension de fichier, sans le point.
    fn extension(&self) -> &'static str;
    fn render(&self, assignments: &[DutyAssignment]) -> Result<String>;
}

/// CSV `datum;dienst;vertretung`, dates en `JJ.MM.AAAA`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl ScheduleExporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, assignments: &[DutyAssignment]) -> Result<String> {
        let mut w = WriterBuilder::new()
            .delimiter(b';')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        w.write_record(["datum", "dienst", "vertretung"])?;
        for entry in assignments {
            let date = entry.date.format("%d.%m.%Y").to_string();
            let primary = entry.primary.to_string();
            let secondary = entry.secondary.to_string();
            w.write_record([date.as_str(), primary.as_str(), secondary.as_str()])?;
        }
        let bytes = w
            .into_inner()
            .map_err(|err| anyhow::anyhow!("flushing CSV: {err}"))?;
        String::from_utf8(bytes).context("CSV output is not UTF-8")
    }
}

/// Flux iCalendar : un événement « journée entière » par titulaire et un
/// `VERTR.:` par remplaçant désigné.
#[derive(Debug, Clone)]
pub struct IcsExporter {
    /// Valeur de `DTSTAMP` ; fixée par l'appelant pour un rendu reproductible.
    pub stamp: DateTime<Utc>,
}

impl IcsExporter {
    pub fn new(stamp: DateTime<Utc>) -> Self {
        Self { stamp }
    }
}

impl ScheduleExporter for IcsExporter {
    fn extension(&self) -> &'static str {
        "ics"
    }

    fn render(&self, assignments: &[DutyAssignment]) -> Result<String> {
        let stamp = self.stamp.format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::from(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//corvee//NONSGML v1.0//EN\r\n",
        );
        for entry in assignments {
            let day = entry.date.format("%Y%m%d").to_string();
            let mut event = |uid_role: &str, summary: String| {
                out.push_str("BEGIN:VEVENT\r\n");
                out.push_str(&format!("UID:{day}-{uid_role}@corvee\r\n"));
                out.push_str(&format!("SUMMARY:{summary}\r\n"));
                out.push_str(&format!("DTSTART;VALUE=DATE:{day}\r\n"));
                out.push_str(&format!("DTSTAMP:{stamp}\r\n"));
                out.push_str("END:VEVENT\r\n");
            };
            event("primary", entry.primary.to_string());
            if let Some(name) = entry.secondary.name() {
                event("secondary", format!("VERTR.: {name}"));
            }
        }
        out.push_str("END:VCALENDAR\r\n");
        Ok(out)
    }
}

/// JSON (jolie mise en forme) des affectations.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl ScheduleExporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, assignments: &[DutyAssignment]) -> Result<String> {
        Ok(serde_json::to_string_pretty(assignments)?)
    }
}

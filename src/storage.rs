use crate::export::ScheduleExporter;
use crate::model::DutyAssignment;
use anyhow::Context;
use chrono::Datelike;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Rend puis écrit le planning de manière atomique (fichier temporaire +
/// renommage). Les répertoires parents sont créés au besoin.
pub fn save_schedule<P: AsRef<Path>>(
    path: P,
    exporter: &dyn ScheduleExporter,
    assignments: &[DutyAssignment],
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let content = exporter.render(assignments)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Entrées d'un mois civil donné.
pub fn filter_by_month(assignments: &[DutyAssignment], year: i32, month: u32) -> Vec<DutyAssignment> {
    assignments
        .iter()
        .filter(|entry| entry.date.year() == year && entry.date.month() == month)
        .cloned()
        .collect()
}

use crate::model::{DutyAssignment, Person};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::debug;

/// Compteurs de corvée d'une personne sur un planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyStats {
    pub name: String,
    pub cohort: u32,
    pub primary: u32,
    pub secondary: u32,
}

impl DutyStats {
    pub fn total(&self) -> u32 {
        self.primary + self.secondary
    }
}

/// Compte titulaire/remplaçant par personne, trié par total décroissant.
///
/// Tout le roster est représenté (y compris à zéro). Les égalités gardent
/// l'ordre du roster ; les noms absents du roster sont ignorés.
pub fn generate_statistics(roster: &[Person], schedule: &[DutyAssignment]) -> Vec<DutyStats> {
    let mut stats: Vec<DutyStats> = Vec::with_capacity(roster.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for person in roster {
        let name = person.full_name();
        if positions.contains_key(&name) {
            continue;
        }
        positions.insert(name.clone(), stats.len());
        stats.push(DutyStats {
            name,
            cohort: person.cohort,
            primary: 0,
            secondary: 0,
        });
    }

    for entry in schedule {
        if let Some(name) = entry.primary.name() {
            match positions.get(name) {
                Some(&pos) => stats[pos].primary += 1,
                None => debug!(name, date = %entry.date, "primary not in roster, skipped"),
            }
        }
        if let Some(name) = entry.secondary.name() {
            match positions.get(name) {
                Some(&pos) => stats[pos].secondary += 1,
                None => debug!(name, date = %entry.date, "secondary not in roster, skipped"),
            }
        }
    }

    stats.sort_by(|a, b| b.total().cmp(&a.total()));
    stats
}

/// Tableau texte (console) des statistiques.
pub fn render_statistics_table(stats: &[DutyStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8}{:<40}{:>10}{:>12}", "cohort", "name", "primary", "secondary");
    let _ = writeln!(out, "{}", "-".repeat(70));
    for s in stats {
        let _ = writeln!(
            out,
            "{:<8}{:<40}{:>10}{:>12}",
            s.cohort, s.name, s.primary, s.secondary
        );
    }
    out
}

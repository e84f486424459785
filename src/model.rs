use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Marqueur affiché quand aucun titulaire/remplaçant n'a pu être désigné.
pub const UNASSIGNED_MARKER: &str = "-";

/// Personne inscrite à la corvée (apprenti·e).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    /// Année d'apprentissage (« Lehrjahr »), > 0.
    pub cohort: u32,
}

impl Person {
    pub fn new<F: Into<String>, L: Into<String>>(first_name: F, last_name: L, cohort: u32) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            cohort,
        }
    }

    /// Identité utilisée pour la planification : « prénom nom ».
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Les deux rôles remplis chaque jour de corvée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Primary,
    Secondary,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => f.write_str("primary"),
            Role::Secondary => f.write_str("secondary"),
        }
    }
}

/// Contenu d'un rôle pour une date donnée.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Assigned(String),
    Unassigned,
}

impl Slot {
    pub fn name(&self) -> Option<&str> {
        match self {
            Slot::Assigned(name) => Some(name.as_str()),
            Slot::Unassigned => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Slot::Assigned(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(UNASSIGNED_MARKER))
    }
}

/// Une ligne du planning : date + titulaire + remplaçant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub date: NaiveDate,
    pub primary: Slot,
    pub secondary: Slot,
}

impl DutyAssignment {
    pub fn unassigned(date: NaiveDate) -> Self {
        Self {
            date,
            primary: Slot::Unassigned,
            secondary: Slot::Unassigned,
        }
    }

    pub fn slot(&self, role: Role) -> &Slot {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
        }
    }
}

/// Ligne brute du tableau des semaines d'école.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockWeek {
    /// Année ISO de la semaine.
    pub year: i32,
    pub cohort: u32,
    pub iso_week: u32,
}

/// Index (année ISO, cohorte) → semaines ISO exemptées.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockWeekIndex {
    weeks: HashMap<(i32, u32), BTreeSet<u32>>,
}

impl BlockWeekIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: BlockWeek) {
        self.weeks
            .entry((entry.year, entry.cohort))
            .or_default()
            .insert(entry.iso_week);
    }

    pub fn contains(&self, year: i32, iso_week: u32, cohort: u32) -> bool {
        self.weeks
            .get(&(year, cohort))
            .is_some_and(|weeks| weeks.contains(&iso_week))
    }

    pub fn len(&self) -> usize {
        self.weeks.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<BlockWeek> for BlockWeekIndex {
    fn from_iter<I: IntoIterator<Item = BlockWeek>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}

/// Jours fériés, ponts et fermetures : aucune corvée ces jours-là.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

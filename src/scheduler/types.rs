use crate::calendar::SchoolYear;
use crate::model::{DutyAssignment, Role};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Options de rotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationOptions {
    /// Noms complets (« prénom nom ») jamais désignés comme titulaires.
    pub primary_exclusions: BTreeSet<String>,
}

impl RotationOptions {
    pub fn exclude_primary<S: Into<String>>(mut self, full_name: S) -> Self {
        self.primary_exclusions.insert(full_name.into());
        self
    }

    pub fn is_primary_excluded(&self, full_name: &str) -> bool {
        self.primary_exclusions.contains(full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    OutsideSchoolYear,
    DuplicateDate,
    BlockWeek {
        role: Role,
        name: String,
        cohort: u32,
        iso_week: u32,
    },
    SamePersonBothRoles(String),
}

/// Incohérence relevée après génération. Consultative uniquement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub date: NaiveDate,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::OutsideSchoolYear => {
                write!(f, "{}: outside of the school year", self.date)
            }
            DiagnosticKind::DuplicateDate => write!(f, "{}: date appears twice", self.date),
            DiagnosticKind::BlockWeek {
                role,
                name,
                cohort,
                iso_week,
            } => write!(
                f,
                "{}: {name} ({role}) assigned during block week {iso_week} of cohort {cohort}",
                self.date
            ),
            DiagnosticKind::SamePersonBothRoles(name) => {
                write!(f, "{}: {name} holds both roles", self.date)
            }
        }
    }
}

/// Résultat d'une génération : planning + diagnostics consultatifs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub school_year: SchoolYear,
    pub assignments: Vec<DutyAssignment>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("school year {0} cannot be represented")]
    YearOutOfRange(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

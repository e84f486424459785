use super::{Diagnostic, DiagnosticKind};
use crate::calendar::{iso_week_of, EligibilityCalendar, SchoolYear};
use crate::model::{DutyAssignment, Person, Role};
use std::collections::{HashMap, HashSet};

pub(super) fn validate_schedule(
    roster: &[Person],
    calendar: &EligibilityCalendar,
    school_year: &SchoolYear,
    assignments: &[DutyAssignment],
) -> Vec<Diagnostic> {
    let mut cohorts: HashMap<String, u32> = HashMap::new();
    for person in roster {
        cohorts.entry(person.full_name()).or_insert(person.cohort);
    }

    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for entry in assignments {
        let date = entry.date;
        if !seen.insert(date) {
            out.push(Diagnostic {
                date,
                kind: DiagnosticKind::DuplicateDate,
            });
        }

        if !school_year.contains(date) {
            out.push(Diagnostic {
                date,
                kind: DiagnosticKind::OutsideSchoolYear,
            });
            continue;
        }

        let (iso_year, iso_week) = iso_week_of(date);
        for role in [Role::Primary, Role::Secondary] {
            let Some(name) = entry.slot(role).name() else {
                continue;
            };
            // noms inconnus du roster : rien à vérifier
            let Some(&cohort) = cohorts.get(name) else {
                continue;
            };
            if calendar.is_block_week(iso_year, iso_week, cohort) {
                out.push(Diagnostic {
                    date,
                    kind: DiagnosticKind::BlockWeek {
                        role,
                        name: name.to_string(),
                        cohort,
                        iso_week,
                    },
                });
            }
        }

        if let (Some(a), Some(b)) = (entry.primary.name(), entry.secondary.name()) {
            if a == b {
                out.push(Diagnostic {
                    date,
                    kind: DiagnosticKind::SamePersonBothRoles(a.to_string()),
                });
            }
        }
    }

    out
}

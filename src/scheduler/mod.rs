mod rotation;
mod types;
mod validation;

pub use types::{Diagnostic, DiagnosticKind, RotationOptions, SchedError, Schedule};

use crate::calendar::{iso_week_of, EligibilityCalendar, SchoolYear};
use crate::model::{DutyAssignment, Person, Slot};
use crate::stats::{self, DutyStats};
use chrono::NaiveDate;
use rotation::{pick_least_loaded, RosterState};
use tracing::{debug, info, warn};

/// Rotateur : répartit titulaire et remplaçant sur les jours de corvée
/// d'une année scolaire.
#[derive(Debug, Clone, Default)]
pub struct DutyRotator {
    roster: Vec<Person>,
    calendar: EligibilityCalendar,
    options: RotationOptions,
}

impl DutyRotator {
    pub fn new(roster: Vec<Person>, calendar: EligibilityCalendar) -> Self {
        Self {
            roster,
            calendar,
            options: RotationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RotationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    pub fn calendar(&self) -> &EligibilityCalendar {
        &self.calendar
    }

    pub fn options(&self) -> &RotationOptions {
        &self.options
    }

    /// Planning paresseux de l'année scolaire `school_year`/`school_year + 1`.
    ///
    /// Chaque appel repart d'un état de rotation neuf.
    pub fn iter_schedule(
        &self,
        school_year: i32,
        include_non_duty_dates: bool,
    ) -> Result<ScheduleIter<'_>, SchedError> {
        let window =
            SchoolYear::for_year(school_year).ok_or(SchedError::YearOutOfRange(school_year))?;
        Ok(ScheduleIter {
            rotator: self,
            school_year: window,
            next: Some(window.start),
            include_non_duty_dates,
            state: RosterState::new(&self.roster),
        })
    }

    /// Génère le planning complet puis le contrôle. Les incohérences sont
    /// journalisées et renvoyées dans `Schedule::diagnostics`, jamais en erreur.
    pub fn generate_schedule(
        &self,
        school_year: i32,
        include_non_duty_dates: bool,
    ) -> Result<Schedule, SchedError> {
        let iter = self.iter_schedule(school_year, include_non_duty_dates)?;
        let window = iter.school_year();
        let assignments: Vec<DutyAssignment> = iter.collect();

        let diagnostics = self.validate_schedule(&window, &assignments);
        for diagnostic in &diagnostics {
            warn!(%diagnostic, "schedule validation");
        }
        info!(
            school_year,
            start = %window.start,
            end = %window.end,
            entries = assignments.len(),
            diagnostics = diagnostics.len(),
            "schedule generated"
        );

        Ok(Schedule {
            school_year: window,
            assignments,
            diagnostics,
        })
    }

    pub fn validate_schedule(
        &self,
        school_year: &SchoolYear,
        assignments: &[DutyAssignment],
    ) -> Vec<Diagnostic> {
        validation::validate_schedule(&self.roster, &self.calendar, school_year, assignments)
    }

    pub fn statistics(&self, assignments: &[DutyAssignment]) -> Vec<DutyStats> {
        stats::generate_statistics(&self.roster, assignments)
    }
}

/// Itérateur fini sur les affectations, dans l'ordre des dates.
#[derive(Debug)]
pub struct ScheduleIter<'r> {
    rotator: &'r DutyRotator,
    school_year: SchoolYear,
    next: Option<NaiveDate>,
    include_non_duty_dates: bool,
    state: RosterState,
}

impl ScheduleIter<'_> {
    pub fn school_year(&self) -> SchoolYear {
        self.school_year
    }

    fn assign(&mut self, date: NaiveDate) -> DutyAssignment {
        let (iso_year, iso_week) = iso_week_of(date);
        let roster = &self.rotator.roster;
        let calendar = &self.rotator.calendar;
        let options = &self.rotator.options;
        let state = &mut self.state;

        let blocked = |idx: usize| calendar.is_block_week(iso_year, iso_week, roster[idx].cohort);

        let last_primary = state.last_primary;
        let primary = pick_least_loaded(
            state.primary_ring.pass(),
            &state.primary_counts,
            |idx| {
                let name = &state.names[idx];
                !options.is_primary_excluded(name)
                    && !blocked(idx)
                    && last_primary.map_or(true, |last| state.names[last] != *name)
            },
        );
        state.primary_ring.complete_pass();

        // jour sans titulaire : `last_primary` reste inchangé
        if let Some(idx) = primary {
            state.primary_counts[idx] += 1;
            state.last_primary = Some(idx);
        }

        let primary_name = primary.map(|idx| state.names[idx].as_str());
        let secondary = pick_least_loaded(
            state.secondary_ring.pass(),
            &state.secondary_counts,
            |idx| !blocked(idx) && Some(state.names[idx].as_str()) != primary_name,
        );
        state.secondary_ring.complete_pass();

        if let Some(idx) = secondary {
            state.secondary_counts[idx] += 1;
        }

        let slot = |choice: Option<usize>| {
            choice.map_or(Slot::Unassigned, |idx| Slot::Assigned(state.names[idx].clone()))
        };
        let entry = DutyAssignment {
            date,
            primary: slot(primary),
            secondary: slot(secondary),
        };
        debug!(%date, primary = %entry.primary, secondary = %entry.secondary, "duty day");
        entry
    }
}

impl Iterator for ScheduleIter<'_> {
    type Item = DutyAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.school_year.end;
        while let Some(date) = self.next.filter(|d| *d <= end) {
            self.next = date.succ_opt();

            if self.rotator.calendar.is_duty_day(date) {
                return Some(self.assign(date));
            }
            if self.include_non_duty_dates {
                return Some(DutyAssignment::unassigned(date));
            }
        }
        self.next = None;
        None
    }
}

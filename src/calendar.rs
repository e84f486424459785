use crate::model::{BlockWeekIndex, HolidaySet};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Fenêtre inclusive d'une année scolaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYear {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SchoolYear {
    /// Année scolaire commençant en septembre de `reference_year`.
    ///
    /// Début : 1er septembre, repoussé au lundi suivant s'il tombe un
    /// vendredi, samedi ou dimanche. Fin : le dimanche qui précède (ou est)
    /// le 31 juillet de l'année suivante. `None` si l'année sort du
    /// calendrier représentable.
    pub fn for_year(reference_year: i32) -> Option<Self> {
        let mut start = NaiveDate::from_ymd_opt(reference_year, 9, 1)?;
        let offset = start.weekday().num_days_from_monday();
        if offset >= 4 {
            start = start.checked_add_days(Days::new(u64::from(7 - offset)))?;
        }

        let mut end = NaiveDate::from_ymd_opt(reference_year.checked_add(1)?, 7, 31)?;
        while end.weekday() != Weekday::Sun {
            end = end.pred_opt()?;
        }

        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Toutes les dates de la fenêtre, dans l'ordre.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Détermine les jours de corvée et les semaines d'école par cohorte.
#[derive(Debug, Clone)]
pub struct EligibilityCalendar {
    holidays: HolidaySet,
    block_weeks: BlockWeekIndex,
    weekend: [Weekday; 2],
}

impl Default for EligibilityCalendar {
    fn default() -> Self {
        Self::new(HolidaySet::default(), BlockWeekIndex::default())
    }
}

impl EligibilityCalendar {
    pub const DEFAULT_WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

    pub fn new(holidays: HolidaySet, block_weeks: BlockWeekIndex) -> Self {
        Self {
            holidays,
            block_weeks,
            weekend: Self::DEFAULT_WEEKEND,
        }
    }

    pub fn with_weekend(mut self, weekend: [Weekday; 2]) -> Self {
        self.weekend = weekend;
        self
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn block_weeks(&self) -> &BlockWeekIndex {
        &self.block_weeks
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(date)
    }

    pub fn is_duty_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// `year` est l'année ISO de la semaine, pas l'année civile.
    pub fn is_block_week(&self, year: i32, iso_week: u32, cohort: u32) -> bool {
        self.block_weeks.contains(year, iso_week, cohort)
    }

    /// Raccourci : la cohorte est-elle en semaine d'école à cette date ?
    pub fn is_blocked_on(&self, date: NaiveDate, cohort: u32) -> bool {
        let (year, week) = iso_week_of(date);
        self.is_block_week(year, week, cohort)
    }
}

/// (année ISO, numéro de semaine ISO) d'une date.
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

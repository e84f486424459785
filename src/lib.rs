#![forbid(unsafe_code)]
//! Corvée — planification quotidienne d'une corvée sur une année scolaire.
//!
//! - Entrées CSV (roster, semaines d'école par cohorte, fériés/fermetures).
//! - Rotation équitable titulaire + remplaçant, sans répétition immédiate.
//! - Diagnostics consultatifs après génération, jamais bloquants.
//! - Export CSV/ICS/JSON ; le rendu HTML reste en dehors de la lib.

pub mod calendar;
pub mod config;
pub mod export;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod stats;
pub mod storage;

pub use calendar::{iso_week_of, EligibilityCalendar, SchoolYear};
pub use config::PlanConfig;
pub use export::{CsvExporter, IcsExporter, JsonExporter, ScheduleExporter};
pub use io::DataLoadError;
pub use model::{
    BlockWeek, BlockWeekIndex, DutyAssignment, HolidaySet, Person, Role, Slot, UNASSIGNED_MARKER,
};
pub use scheduler::{
    Diagnostic, DiagnosticKind, DutyRotator, RotationOptions, SchedError, Schedule, ScheduleIter,
};
pub use stats::{generate_statistics, render_statistics_table, DutyStats};
pub use storage::{filter_by_month, save_schedule};

use crate::calendar::EligibilityCalendar;
use crate::io;
use crate::scheduler::{DutyRotator, RotationOptions};
use anyhow::{bail, Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration d'un plan : fichiers d'entrée et règles de rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_roster")]
    pub roster: PathBuf,
    #[serde(default = "default_block_weeks")]
    pub block_weeks: PathBuf,
    #[serde(default = "default_holidays")]
    pub holidays: PathBuf,
    /// Noms complets jamais désignés titulaires.
    #[serde(default)]
    pub primary_exclusions: Vec<String>,
    #[serde(default = "default_weekend")]
    pub weekend_days: Vec<Weekday>,
}

fn default_roster() -> PathBuf {
    PathBuf::from("data/Azubis.csv")
}

fn default_block_weeks() -> PathBuf {
    PathBuf::from("data/Blockwochen_Schule.csv")
}

fn default_holidays() -> PathBuf {
    PathBuf::from("data/Feiertage_Schliesszeiten.csv")
}

fn default_weekend() -> Vec<Weekday> {
    EligibilityCalendar::DEFAULT_WEEKEND.to_vec()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            block_weeks: default_block_weeks(),
            holidays: default_holidays(),
            primary_exclusions: Vec::new(),
            weekend_days: default_weekend(),
        }
    }
}

impl PlanConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let config: PlanConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.weekend().map(|_| ())
    }

    /// Les deux jours de week-end, distincts.
    pub fn weekend(&self) -> Result<[Weekday; 2]> {
        match self.weekend_days.as_slice() {
            [a, b] if a != b => Ok([*a, *b]),
            [_, _] => bail!("weekend_days must name two different days"),
            other => bail!("weekend_days must contain exactly 2 days, got {}", other.len()),
        }
    }

    pub fn rotation_options(&self) -> RotationOptions {
        RotationOptions {
            primary_exclusions: self
                .primary_exclusions
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Charge les trois tableaux et construit le rotateur. Toute ligne
    /// invalide fait échouer le chargement avant la génération.
    pub fn build_rotator(&self) -> Result<DutyRotator> {
        let weekend = self.weekend()?;
        let roster = io::load_roster_csv(&self.roster)?;
        let block_weeks = io::load_block_weeks_csv(&self.block_weeks)?;
        let holidays = io::load_holidays_csv(&self.holidays)?;
        info!(
            people = roster.len(),
            block_weeks = block_weeks.len(),
            holidays = holidays.len(),
            "inputs loaded"
        );

        let calendar = EligibilityCalendar::new(holidays, block_weeks).with_weekend(weekend);
        Ok(DutyRotator::new(roster, calendar).with_options(self.rotation_options()))
    }
}

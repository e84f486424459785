#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use corvee::{
    config::PlanConfig,
    export::{CsvExporter, IcsExporter, JsonExporter, ScheduleExporter},
    stats::render_statistics_table,
    storage::{filter_by_month, save_schedule},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de la corvée quotidienne
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Configuration JSON (chemins, exclusions, week-end)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV du roster (remplace la config)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// CSV des semaines d'école (remplace la config)
    #[arg(long, global = true)]
    block_weeks: Option<PathBuf>,

    /// CSV des fériés/fermetures (remplace la config)
    #[arg(long, global = true)]
    holidays: Option<PathBuf>,

    /// "Prénom Nom" à ne jamais désigner titulaire (répétable)
    #[arg(long = "exclude", global = true)]
    exclude: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Ics,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le planning d'une année scolaire
    Generate {
        /// Année de rentrée (2024 pour 2024/2025)
        #[arg(long)]
        year: i32,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Fichier de sortie (défaut : output/corvee_<année>.<ext>)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Inclure week-ends et fériés (rôles non attribués)
        #[arg(long)]
        all_dates: bool,
        /// Répertoire pour un fichier par mois (optionnel)
        #[arg(long)]
        monthly_dir: Option<PathBuf>,
    },

    /// Afficher les statistiques par personne
    Stats {
        #[arg(long)]
        year: i32,
    },

    /// Contrôler le planning généré
    Check {
        #[arg(long)]
        year: i32,
    },
}

fn plan_config(cli: &Cli) -> Result<PlanConfig> {
    let mut config = match &cli.config {
        Some(path) => PlanConfig::load(path)?,
        None => PlanConfig::default(),
    };
    if let Some(path) = &cli.roster {
        config.roster = path.clone();
    }
    if let Some(path) = &cli.block_weeks {
        config.block_weeks = path.clone();
    }
    if let Some(path) = &cli.holidays {
        config.holidays = path.clone();
    }
    config.primary_exclusions.extend(cli.exclude.iter().cloned());
    Ok(config)
}

fn exporter(format: Format) -> Box<dyn ScheduleExporter> {
    match format {
        Format::Csv => Box::new(CsvExporter),
        Format::Ics => Box::new(IcsExporter::new(Utc::now())),
        Format::Json => Box::new(JsonExporter),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let rotator = plan_config(&cli)?.build_rotator()?;

    let code = match cli.cmd {
        Commands::Generate {
            year,
            format,
            out,
            all_dates,
            monthly_dir,
        } => {
            let schedule = rotator.generate_schedule(year, all_dates)?;
            let renderer = exporter(format);
            let out = out.unwrap_or_else(|| {
                PathBuf::from(format!("output/corvee_{year}.{}", renderer.extension()))
            });
            save_schedule(&out, renderer.as_ref(), &schedule.assignments)?;

            if let Some(dir) = monthly_dir {
                for y in [year, year + 1] {
                    for month in 1..=12 {
                        let monthly = filter_by_month(&schedule.assignments, y, month);
                        if monthly.is_empty() {
                            continue;
                        }
                        let path = dir.join(format!("{y}_{month:02}.{}", renderer.extension()));
                        save_schedule(path, renderer.as_ref(), &monthly)?;
                    }
                }
                println!("Monthly schedules written to {}", dir.display());
            }

            print!("{}", render_statistics_table(&rotator.statistics(&schedule.assignments)));
            println!(
                "Schedule {}/{} ({} → {}) written to {}",
                year,
                year + 1,
                schedule.school_year.start,
                schedule.school_year.end,
                out.display()
            );
            0
        }
        Commands::Stats { year } => {
            let schedule = rotator.generate_schedule(year, false)?;
            print!("{}", render_statistics_table(&rotator.statistics(&schedule.assignments)));
            0
        }
        Commands::Check { year } => {
            let schedule = rotator.generate_schedule(year, false)?;
            if schedule.diagnostics.is_empty() {
                println!("OK: no inconsistencies");
                0
            } else {
                eprintln!("Found {} inconsistenc(ies)", schedule.diagnostics.len());
                for diagnostic in &schedule.diagnostics {
                    eprintln!("{diagnostic}");
                }
                // Code 2 = WARNING
                2
            }
        }
    };

    std::process::exit(code);
}

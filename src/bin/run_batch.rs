//! Run the NPS vs UPS comparison for every employee in a roster CSV
//!
//! Outputs one settled summary row per employee

use anyhow::{Context, Result};
use clap::Parser;
use pension_compare::params::{load_assumptions, load_roster};
use pension_compare::scenario::EmployeeOutcome;
use pension_compare::{GrowthAssumptions, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch", about = "Batch NPS vs UPS comparison over an employee roster")]
struct Cli {
    /// Roster CSV: employee_id plus the seven personal-data columns
    roster: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,

    /// Config file (INI or .json) whose [assumptions] section applies to every employee
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// Flat output row per employee
#[derive(Debug, Serialize)]
struct BatchRow {
    employee_id: String,
    retirement_year: u32,
    nps_corpus: f64,
    ups_corpus: f64,
    nps_annuity: f64,
    ups_pension: f64,
    nps_lumpsum: f64,
    ups_lumpsum: f64,
    benchmark_corpus: f64,
    service_ratio: f64,
    fully_funded: bool,
    floor_applied: bool,
}

impl From<EmployeeOutcome> for BatchRow {
    fn from(outcome: EmployeeOutcome) -> Self {
        let s = outcome.summary;
        Self {
            employee_id: outcome.employee_id,
            retirement_year: s.retirement_year,
            nps_corpus: s.nps_corpus,
            ups_corpus: s.ups_corpus,
            nps_annuity: s.nps_annuity,
            ups_pension: s.ups_pension,
            nps_lumpsum: s.nps_lumpsum,
            ups_lumpsum: s.ups_lumpsum,
            benchmark_corpus: s.benchmark_corpus,
            service_ratio: s.service_ratio,
            fully_funded: s.fully_funded,
            floor_applied: s.floor_applied,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let assumptions = match &cli.assumptions {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => GrowthAssumptions::default(),
    };

    println!("Loading roster from {}...", cli.roster.display());
    let roster = load_roster(&cli.roster)
        .with_context(|| format!("Failed to load roster from {}", cli.roster.display()))?;
    println!("Loaded {} employees in {:?}", roster.len(), start.elapsed());

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let proj_start = Instant::now();
    let outcomes = runner.run_batch(&roster);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;

    let mut skipped = 0;
    for (entry, outcome) in roster.iter().zip(outcomes) {
        match outcome {
            Ok(outcome) => writer.serialize(BatchRow::from(outcome))?,
            Err(e) => {
                log::warn!("Skipping employee {}: {}", entry.employee_id, e);
                skipped += 1;
            }
        }
    }
    writer.flush()?;

    println!("Output written to {}", cli.output.display());
    println!("  Settled: {}", roster.len() - skipped);
    println!("  Skipped: {}", skipped);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}

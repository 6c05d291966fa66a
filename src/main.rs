//! Pension Compare CLI
//!
//! Projects NPS and UPS corpora to retirement and prints the settlement

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pension_compare::params::{
    load_config, DEFAULT_ANNUITY_RATE, DEFAULT_BASIC_PAY_HIKE, DEFAULT_BENCHMARK_CORPUS_RETURN,
    DEFAULT_DA_HIKE, DEFAULT_NPS_RETURN, DEFAULT_RATE_OF_INFLATION,
};
use pension_compare::{
    export, CorpusHistory, GrowthAssumptions, ProjectionEngine, RetirementSummary, SimulationParameters,
    YearSnapshot,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pension_compare", version, about = "Run NPS vs UPS pension simulation")]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Provide all inputs directly
    Direct {
        #[command(flatten)]
        personal: PersonalArgs,

        #[command(flatten)]
        assumptions: AssumptionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load inputs from an INI (or .json) config file
    FromFile {
        /// Path to config with a [personal_data] section and optional [assumptions] section
        #[arg(value_parser = existing_file)]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct PersonalArgs {
    /// Years of service completed
    current_service: u32,
    /// Years remaining until retirement
    years_to_retire: u32,
    /// Current basic pay
    current_basic_pay: f64,
    /// Current DA rate
    current_da_rate: f64,
    /// Current total NPS corpus
    current_total_nps_corpus: f64,
    /// Fraction of corpus withdrawn at retirement
    withdrawal_percentage: f64,
    /// Current annual expenses
    current_annual_expense: f64,
}

#[derive(Args)]
struct AssumptionArgs {
    /// Expected yearly DA hike
    #[arg(long = "expected_da_hike", alias = "expected-da-hike", default_value_t = DEFAULT_DA_HIKE)]
    expected_da_hike: f64,
    /// Expected yearly basic pay hike
    #[arg(long = "expected_basic_pay_hike", alias = "expected-basic-pay-hike", default_value_t = DEFAULT_BASIC_PAY_HIKE)]
    expected_basic_pay_hike: f64,
    /// Expected NPS return
    #[arg(long = "expected_nps_return", alias = "expected-nps-return", default_value_t = DEFAULT_NPS_RETURN)]
    expected_nps_return: f64,
    /// Expected benchmark corpus return
    #[arg(long = "expected_benchmark_corpus_return", alias = "expected-benchmark-corpus-return", default_value_t = DEFAULT_BENCHMARK_CORPUS_RETURN)]
    expected_benchmark_corpus_return: f64,
    /// Expected annuity rate
    #[arg(long = "expected_annuity_rate", alias = "expected-annuity-rate", default_value_t = DEFAULT_ANNUITY_RATE)]
    expected_annuity_rate: f64,
    /// Expected inflation rate
    #[arg(long = "expected_rate_of_inflation", alias = "expected-rate-of-inflation", default_value_t = DEFAULT_RATE_OF_INFLATION)]
    expected_rate_of_inflation: f64,
}

#[derive(Args)]
struct OutputArgs {
    /// Save corpus history to this CSV file
    #[arg(long)]
    save_csv: Option<PathBuf>,
    /// Print the summary and yearly history as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a RetirementSummary,
    years: &'a [YearSnapshot],
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("Config file not found: {}", path.display()))
    }
}

impl PersonalArgs {
    fn into_params(self, assumptions: AssumptionArgs) -> SimulationParameters {
        SimulationParameters::new(
            self.current_service,
            self.years_to_retire,
            self.current_basic_pay,
            self.current_da_rate,
            self.current_total_nps_corpus,
            self.withdrawal_percentage,
            self.current_annual_expense,
        )
        .with_assumptions(GrowthAssumptions {
            expected_da_hike: assumptions.expected_da_hike,
            expected_basic_pay_hike: assumptions.expected_basic_pay_hike,
            expected_nps_return: assumptions.expected_nps_return,
            expected_benchmark_corpus_return: assumptions.expected_benchmark_corpus_return,
            expected_annuity_rate: assumptions.expected_annuity_rate,
            expected_rate_of_inflation: assumptions.expected_rate_of_inflation,
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (params, output) = match cli.mode {
        Mode::Direct { personal, assumptions, output } => (personal.into_params(assumptions), output),
        Mode::FromFile { file, output } => {
            let params = load_config(&file)
                .with_context(|| format!("Failed to load config from {}", file.display()))?;
            (params, output)
        }
    };

    let history = ProjectionEngine::new(params)
        .run()
        .context("Pension simulation failed")?;
    let summary = RetirementSummary::from_history(&history)?;

    if output.json {
        let report = JsonReport {
            summary: &summary,
            years: history.snapshots(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("{}", summary);
    }

    if let Some(path) = output.save_csv.as_deref() {
        save_csv(&history, path)?;
        if !output.json {
            println!("\nCorpus history saved to {}", path.display());
        }
    }

    Ok(())
}

fn save_csv(history: &CorpusHistory, path: &Path) -> Result<()> {
    export::write_csv(history, path).with_context(|| format!("Failed to write CSV to {}", path.display()))
}

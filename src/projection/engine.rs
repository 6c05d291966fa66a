//! Core projection engine for yearly corpus accumulation

use super::growth::{calculate_salary, get_yearly_accumulated_corpus, NPS_CONTRIB_RATE, UPS_CONTRIB_RATE};
use super::snapshot::{CorpusHistory, YearSnapshot};
use crate::error::PensionResult;
use crate::params::SimulationParameters;

/// Opening position of a projected year
#[derive(Debug, Clone, Copy)]
struct OpeningState {
    basic_pay: f64,
    da_rate: f64,
    nps_corpus: f64,
    ups_corpus: f64,
    benchmark_corpus: f64,
    annual_expense: f64,
}

impl OpeningState {
    /// First year is seeded from the parameters; the current NPS corpus
    /// seeds all three corpora.
    fn from_params(params: &SimulationParameters) -> Self {
        Self {
            basic_pay: params.current_basic_pay,
            da_rate: params.current_da_rate,
            nps_corpus: params.current_total_nps_corpus,
            ups_corpus: params.current_total_nps_corpus,
            benchmark_corpus: params.current_total_nps_corpus,
            annual_expense: params.current_annual_expense,
        }
    }

    /// Later years carry forward the prior year's closing values
    fn from_previous(previous: &YearSnapshot) -> Self {
        Self {
            basic_pay: previous.next_year_basic_pay,
            da_rate: previous.next_year_da_rate,
            nps_corpus: previous.nps_corpus,
            ups_corpus: previous.ups_corpus,
            benchmark_corpus: previous.benchmark_corpus,
            annual_expense: previous.annual_expense,
        }
    }
}

/// Project a single year.
///
/// `year_index` is 0-based; `previous` is `None` only for the first year.
/// The returned snapshot carries `year = year_index + 1`.
pub fn project_year(
    year_index: u32,
    params: &SimulationParameters,
    previous: Option<&YearSnapshot>,
) -> YearSnapshot {
    let assumptions = &params.assumptions;
    let opening = match previous {
        Some(prev) => OpeningState::from_previous(prev),
        None => OpeningState::from_params(params),
    };

    let salary = calculate_salary(opening.basic_pay, opening.da_rate);

    // Contributions
    let nps_contrib = salary * NPS_CONTRIB_RATE;
    let ups_contrib = salary * UPS_CONTRIB_RATE;
    // Benchmark tracks the UPS cash flow under the benchmark return
    let benchmark_contrib = ups_contrib;

    YearSnapshot {
        year: year_index + 1,
        basic_pay: opening.basic_pay,
        da_rate: opening.da_rate,
        salary,
        next_year_basic_pay: opening.basic_pay * (1.0 + assumptions.expected_basic_pay_hike),
        // DA hikes are additive percentage points
        next_year_da_rate: opening.da_rate + assumptions.expected_da_hike,
        monthly_nps_contrib: nps_contrib,
        monthly_ups_contrib: ups_contrib,
        monthly_benchmark_contrib: benchmark_contrib,
        nps_corpus: get_yearly_accumulated_corpus(opening.nps_corpus, assumptions.expected_nps_return, nps_contrib),
        ups_corpus: get_yearly_accumulated_corpus(opening.ups_corpus, assumptions.expected_nps_return, ups_contrib),
        benchmark_corpus: get_yearly_accumulated_corpus(
            opening.benchmark_corpus,
            assumptions.expected_benchmark_corpus_return,
            benchmark_contrib,
        ),
        annual_expense: opening.annual_expense * (1.0 + assumptions.expected_rate_of_inflation),
        ups_pension: 0.0,
        nps_annuity: 0.0,
    }
}

/// Projection engine for one employee's parameter set
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: SimulationParameters,
}

impl ProjectionEngine {
    pub fn new(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Project every year up to retirement, without settling
    pub fn project(&self) -> PensionResult<CorpusHistory> {
        self.params.validate()?;

        let years = self.params.years_to_retire;
        log::info!(
            "Projecting {} years (service {}, basic pay {:.2}, DA {:.2})",
            years,
            self.params.current_service,
            self.params.current_basic_pay,
            self.params.current_da_rate,
        );

        let mut history = CorpusHistory::with_capacity(years as usize);
        for year_index in 0..years {
            let snapshot = project_year(year_index, &self.params, history.last());
            log::debug!(
                "Year {}: salary {:.2}, NPS {:.2}, UPS {:.2}, benchmark {:.2}",
                snapshot.year,
                snapshot.salary,
                snapshot.nps_corpus,
                snapshot.ups_corpus,
                snapshot.benchmark_corpus,
            );
            history.add(snapshot)?;
        }

        Ok(history)
    }

    /// Project to retirement and settle the final year
    pub fn run(&self) -> PensionResult<CorpusHistory> {
        let mut history = self.project()?;
        history.calculate_pension(&self.params)?;
        Ok(history)
    }
}

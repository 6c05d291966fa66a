//! Retirement settlement: NPS lump sum and annuity, UPS lump sum and pension
//!
//! Applied once to the final projected year. The UPS guarantee is compared
//! against a benchmark corpus grown on the same contributions at the
//! benchmark return:
//! - fully funded (remaining UPS corpus covers the benchmark): the full
//!   pension base is paid and the surplus is credited to the UPS corpus
//! - partially funded: the pension base is scaled by remaining / benchmark
//!
//! Either way the base is floored at the statutory minimum before DA is added.

use serde::{Deserialize, Serialize};

use crate::params::SimulationParameters;
use crate::projection::YearSnapshot;

/// Months of service that qualify for the full UPS pension (25 years)
pub const FULL_SERVICE_MONTHS: f64 = 300.0;

/// Statutory minimum UPS pension base, before DA
pub const MIN_UPS_PENSION: f64 = 10_000.0;

/// Gratuity-style UPS lump sum: one tenth of a month's emoluments per
/// completed half-year of service
const UPS_LUMPSUM_HALF_YEARS_PER_YEAR: f64 = 2.0;
const UPS_LUMPSUM_FRACTION: f64 = 10.0;

/// All intermediate and final values of a retirement settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    // NPS
    /// Lump sum withdrawn from the NPS corpus
    pub nps_lumpsum: f64,
    /// Monthly annuity bought with the remaining NPS corpus
    pub nps_annuity: f64,

    // UPS
    /// Completed fraction of full qualifying service, capped at 1
    pub service_ratio: f64,
    /// Pension base before the funding comparison
    pub max_ups_pension: f64,
    pub ups_lumpsum: f64,
    /// UPS corpus left after the lump-sum withdrawal
    pub remaining_ups_corpus: f64,
    /// Whether the remaining UPS corpus covers the benchmark corpus
    pub fully_funded: bool,
    /// Pension base after the funding comparison and floor
    pub ups_pension_basic: f64,
    pub floor_applied: bool,
    /// Monthly UPS pension including DA
    pub ups_pension: f64,

    // Reported corpus figures
    pub ups_corpus: f64,
    pub nps_corpus: f64,
}

impl Settlement {
    /// `(ups_pension, nps_annuity, ups_corpus, nps_corpus)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.ups_pension, self.nps_annuity, self.ups_corpus, self.nps_corpus)
    }
}

/// Fraction of the 300-month qualifying period served, capped at 1
pub fn service_ratio(total_service_years: u32) -> f64 {
    let total_service_months = total_service_years as f64 * 12.0;
    (total_service_months / FULL_SERVICE_MONTHS).min(1.0)
}

/// Calculate the settlement for the final projected year
pub fn settle(info: &YearSnapshot, params: &SimulationParameters) -> Settlement {
    let withdrawal = params.withdrawal_percentage;

    // NPS: withdraw, annuitize the rest
    let nps_lumpsum = info.nps_corpus * withdrawal;
    let nps_annuity = info.nps_corpus * (1.0 - withdrawal) * params.assumptions.expected_annuity_rate / 12.0;

    // UPS pension base from average basic pay over the final two years
    let total_service_years = params.total_service_years();
    let service_ratio = service_ratio(total_service_years);
    let avg_basic_pay = (info.basic_pay + info.next_year_basic_pay) / 2.0;
    let max_ups_pension = avg_basic_pay * service_ratio;

    let final_drawn_salary = info.next_year_basic_pay * (1.0 + info.next_year_da_rate);
    let ups_lumpsum = total_service_years as f64 * UPS_LUMPSUM_HALF_YEARS_PER_YEAR * final_drawn_salary
        / UPS_LUMPSUM_FRACTION;

    let remaining_ups_corpus = info.ups_corpus * (1.0 - withdrawal);
    let mut ups_corpus = ups_lumpsum + info.ups_corpus * withdrawal;

    let fully_funded = remaining_ups_corpus >= info.benchmark_corpus;
    let funded_base = if fully_funded {
        ups_corpus += info.ups_corpus - info.benchmark_corpus;
        max_ups_pension
    } else {
        // benchmark_corpus > remaining_ups_corpus >= 0 here
        max_ups_pension * (remaining_ups_corpus / info.benchmark_corpus)
    };

    let floor_applied = funded_base < MIN_UPS_PENSION;
    let ups_pension_basic = if floor_applied {
        log::warn!(
            "UPS pension base {:.2} below statutory minimum, raised to {:.2}",
            funded_base,
            MIN_UPS_PENSION
        );
        MIN_UPS_PENSION
    } else {
        funded_base
    };

    let ups_pension = ups_pension_basic * (1.0 + info.next_year_da_rate);

    log::debug!(
        "Settlement year {}: service ratio {:.4}, funded {}, UPS base {:.2}",
        info.year,
        service_ratio,
        fully_funded,
        ups_pension_basic,
    );

    Settlement {
        nps_lumpsum,
        nps_annuity,
        service_ratio,
        max_ups_pension,
        ups_lumpsum,
        remaining_ups_corpus,
        fully_funded,
        ups_pension_basic,
        floor_applied,
        ups_pension,
        ups_corpus,
        nps_corpus: nps_lumpsum,
    }
}

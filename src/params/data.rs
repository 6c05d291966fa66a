//! Simulation parameter structures

use serde::{Deserialize, Serialize};

use crate::error::{PensionError, PensionResult};

pub const DEFAULT_DA_HIKE: f64 = 0.05;
pub const DEFAULT_BASIC_PAY_HIKE: f64 = 0.05;
pub const DEFAULT_NPS_RETURN: f64 = 0.10;
pub const DEFAULT_BENCHMARK_CORPUS_RETURN: f64 = 0.08;
pub const DEFAULT_ANNUITY_RATE: f64 = 0.06;
pub const DEFAULT_RATE_OF_INFLATION: f64 = 0.05;

/// Upper bound on projected years and on total service at retirement
pub const MAX_SERVICE_YEARS: u32 = 100;

/// Annual growth-rate assumptions, all expressed as fractions (0.05 = 5%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthAssumptions {
    /// Additive yearly increase in DA rate
    pub expected_da_hike: f64,

    /// Multiplicative yearly increase in basic pay
    pub expected_basic_pay_hike: f64,

    /// Market return on the NPS and UPS corpora
    pub expected_nps_return: f64,

    /// Return assumed for the government benchmark corpus
    pub expected_benchmark_corpus_return: f64,

    /// Annuity rate applied to the non-withdrawn NPS corpus
    pub expected_annuity_rate: f64,

    /// Growth of annual household expense
    pub expected_rate_of_inflation: f64,
}

impl Default for GrowthAssumptions {
    fn default() -> Self {
        Self {
            expected_da_hike: DEFAULT_DA_HIKE,
            expected_basic_pay_hike: DEFAULT_BASIC_PAY_HIKE,
            expected_nps_return: DEFAULT_NPS_RETURN,
            expected_benchmark_corpus_return: DEFAULT_BENCHMARK_CORPUS_RETURN,
            expected_annuity_rate: DEFAULT_ANNUITY_RATE,
            expected_rate_of_inflation: DEFAULT_RATE_OF_INFLATION,
        }
    }
}

impl GrowthAssumptions {
    fn validate(&self) -> PensionResult<()> {
        let rates = [
            ("expected_da_hike", self.expected_da_hike),
            ("expected_basic_pay_hike", self.expected_basic_pay_hike),
            ("expected_nps_return", self.expected_nps_return),
            ("expected_benchmark_corpus_return", self.expected_benchmark_corpus_return),
            ("expected_annuity_rate", self.expected_annuity_rate),
            ("expected_rate_of_inflation", self.expected_rate_of_inflation),
        ];
        for (name, rate) in rates {
            if !rate.is_finite() {
                return Err(PensionError::invalid(name, format!("must be finite, got {}", rate)));
            }
        }

        // Monthly compounding factor (1 + r/12) must stay positive
        for (name, rate) in [
            ("expected_nps_return", self.expected_nps_return),
            ("expected_benchmark_corpus_return", self.expected_benchmark_corpus_return),
        ] {
            if rate <= -12.0 {
                return Err(PensionError::invalid(
                    name,
                    format!("must be greater than -12.0, got {}", rate),
                ));
            }
        }

        Ok(())
    }
}

/// Inputs for one employee's projection run. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Years of service already completed
    pub current_service: u32,

    /// Years remaining until retirement (number of projected years)
    pub years_to_retire: u32,

    /// Current monthly basic pay
    pub current_basic_pay: f64,

    /// Current dearness-allowance rate as a fraction of basic pay
    pub current_da_rate: f64,

    /// Current total NPS corpus; seeds the NPS, UPS and benchmark corpora alike
    pub current_total_nps_corpus: f64,

    /// Fraction of the corpus withdrawn as a lump sum at retirement
    pub withdrawal_percentage: f64,

    /// Current annual household expense
    pub current_annual_expense: f64,

    pub assumptions: GrowthAssumptions,
}

impl SimulationParameters {
    /// Create parameters with default growth assumptions
    pub fn new(
        current_service: u32,
        years_to_retire: u32,
        current_basic_pay: f64,
        current_da_rate: f64,
        current_total_nps_corpus: f64,
        withdrawal_percentage: f64,
        current_annual_expense: f64,
    ) -> Self {
        Self {
            current_service,
            years_to_retire,
            current_basic_pay,
            current_da_rate,
            current_total_nps_corpus,
            withdrawal_percentage,
            current_annual_expense,
            assumptions: GrowthAssumptions::default(),
        }
    }

    /// Replace the growth assumptions
    pub fn with_assumptions(mut self, assumptions: GrowthAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    /// Total qualifying service at retirement, in years
    pub fn total_service_years(&self) -> u32 {
        self.years_to_retire.saturating_add(self.current_service)
    }

    /// Reject parameter sets that would produce a degenerate projection
    pub fn validate(&self) -> PensionResult<()> {
        if self.years_to_retire == 0 {
            return Err(PensionError::invalid("years_to_retire", "must be positive, got 0"));
        }

        if self.years_to_retire > MAX_SERVICE_YEARS {
            return Err(PensionError::invalid(
                "years_to_retire",
                format!("must not exceed {} years, got {}", MAX_SERVICE_YEARS, self.years_to_retire),
            ));
        }

        let total_service = self
            .years_to_retire
            .checked_add(self.current_service)
            .filter(|total| *total <= MAX_SERVICE_YEARS);
        if total_service.is_none() {
            return Err(PensionError::invalid(
                "current_service",
                format!(
                    "service at retirement must not exceed {} years, got {} + {}",
                    MAX_SERVICE_YEARS, self.current_service, self.years_to_retire
                ),
            ));
        }

        let amounts = [
            ("current_basic_pay", self.current_basic_pay),
            ("current_da_rate", self.current_da_rate),
            ("current_total_nps_corpus", self.current_total_nps_corpus),
            ("current_annual_expense", self.current_annual_expense),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(PensionError::invalid(
                    name,
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.withdrawal_percentage) {
            return Err(PensionError::invalid(
                "withdrawal_percentage",
                format!("must be within [0, 1], got {}", self.withdrawal_percentage),
            ));
        }

        self.assumptions.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> SimulationParameters {
        SimulationParameters::new(10, 5, 50_000.0, 0.5, 1_000_000.0, 0.6, 300_000.0)
    }

    #[test]
    fn test_defaults() {
        let a = GrowthAssumptions::default();
        assert_eq!(a.expected_da_hike, 0.05);
        assert_eq!(a.expected_basic_pay_hike, 0.05);
        assert_eq!(a.expected_nps_return, 0.10);
        assert_eq!(a.expected_benchmark_corpus_return, 0.08);
        assert_eq!(a.expected_annuity_rate, 0.06);
        assert_eq!(a.expected_rate_of_inflation, 0.05);
    }

    #[test]
    fn test_valid_params_pass() {
        assert!(base_params().validate().is_ok());
        assert_eq!(base_params().total_service_years(), 15);
    }

    #[test]
    fn test_zero_years_rejected() {
        let params = SimulationParameters { years_to_retire: 0, ..base_params() };
        match params.validate() {
            Err(PensionError::InvalidParameter { name, .. }) => assert_eq!(name, "years_to_retire"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_service_overflow_rejected() {
        let params = SimulationParameters { current_service: u32::MAX, years_to_retire: 1, ..base_params() };
        match params.validate() {
            Err(PensionError::InvalidParameter { name, .. }) => assert_eq!(name, "current_service"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
        assert_eq!(params.total_service_years(), u32::MAX);
    }

    #[test]
    fn test_service_bound() {
        let params = SimulationParameters { current_service: 0, years_to_retire: u32::MAX, ..base_params() };
        match params.validate() {
            Err(PensionError::InvalidParameter { name, .. }) => assert_eq!(name, "years_to_retire"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }

        let params = SimulationParameters { current_service: 60, years_to_retire: 41, ..base_params() };
        assert!(params.validate().is_err());

        let params = SimulationParameters { current_service: 60, years_to_retire: 40, ..base_params() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_withdrawal_out_of_range_rejected() {
        for wp in [-0.1, 1.01, f64::NAN] {
            let params = SimulationParameters { withdrawal_percentage: wp, ..base_params() };
            assert!(params.validate().is_err(), "withdrawal {} should be rejected", wp);
        }
        let params = SimulationParameters { withdrawal_percentage: 1.0, ..base_params() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let params = SimulationParameters { current_basic_pay: -1.0, ..base_params() };
        assert!(params.validate().is_err());

        let params = SimulationParameters { current_total_nps_corpus: -5.0, ..base_params() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let assumptions = GrowthAssumptions {
            expected_nps_return: f64::INFINITY,
            ..Default::default()
        };
        let params = base_params().with_assumptions(assumptions);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_return_allowed() {
        let assumptions = GrowthAssumptions {
            expected_nps_return: -0.02,
            ..Default::default()
        };
        assert!(base_params().with_assumptions(assumptions).validate().is_ok());
    }
}

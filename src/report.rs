//! Retirement summary for the printed and JSON reports

use serde::Serialize;
use std::fmt;

use crate::error::{PensionError, PensionResult};
use crate::projection::{CorpusHistory, YearSnapshot};

/// Headline retirement figures of a settled projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetirementSummary {
    pub retirement_year: u32,
    pub nps_corpus: f64,
    pub ups_corpus: f64,
    pub nps_annuity: f64,
    pub ups_pension: f64,
    pub nps_lumpsum: f64,
    pub ups_lumpsum: f64,
    pub benchmark_corpus: f64,
    pub service_ratio: f64,
    pub fully_funded: bool,
    pub floor_applied: bool,
    pub annual_expense: f64,
}

impl RetirementSummary {
    /// Build the summary from a history whose final year has been settled
    pub fn from_history(history: &CorpusHistory) -> PensionResult<Self> {
        let last = history.last().ok_or(PensionError::EmptyHistory)?;
        let Some(settlement) = history.settlement() else {
            return Ok(Self::unsettled(last));
        };

        Ok(Self {
            retirement_year: last.year,
            nps_corpus: last.nps_corpus,
            ups_corpus: last.ups_corpus,
            nps_annuity: last.nps_annuity,
            ups_pension: last.ups_pension,
            nps_lumpsum: settlement.nps_lumpsum,
            ups_lumpsum: settlement.ups_lumpsum,
            benchmark_corpus: last.benchmark_corpus,
            service_ratio: settlement.service_ratio,
            fully_funded: settlement.fully_funded,
            floor_applied: settlement.floor_applied,
            annual_expense: last.annual_expense,
        })
    }

    // Corpus figures only; pension fields stay zero until settlement
    fn unsettled(last: &YearSnapshot) -> Self {
        Self {
            retirement_year: last.year,
            nps_corpus: last.nps_corpus,
            ups_corpus: last.ups_corpus,
            nps_annuity: 0.0,
            ups_pension: 0.0,
            nps_lumpsum: 0.0,
            ups_lumpsum: 0.0,
            benchmark_corpus: last.benchmark_corpus,
            service_ratio: 0.0,
            fully_funded: false,
            floor_applied: false,
            annual_expense: last.annual_expense,
        }
    }

    /// Monthly UPS pension minus monthly NPS annuity
    pub fn monthly_pension_gap(&self) -> f64 {
        self.ups_pension - self.nps_annuity
    }
}

impl fmt::Display for RetirementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Projected values at retirement (Year {}):", self.retirement_year)?;
        writeln!(f, "  NPS: ₹{:.2}", self.nps_corpus)?;
        writeln!(f, "  UPS: ₹{:.2}", self.ups_corpus)?;
        writeln!(f, "  NPS annuity (monthly): ₹{:.2}", self.nps_annuity)?;
        writeln!(f, "  UPS pension (including DA): ₹{:.2}", self.ups_pension)?;
        writeln!(f)?;
        writeln!(f, "  NPS lump sum: ₹{:.2}", self.nps_lumpsum)?;
        writeln!(f, "  UPS lump sum: ₹{:.2}", self.ups_lumpsum)?;
        writeln!(f, "  Benchmark corpus: ₹{:.2}", self.benchmark_corpus)?;
        writeln!(f, "  Service ratio: {:.4}", self.service_ratio)?;
        writeln!(
            f,
            "  UPS guarantee: {}{}",
            if self.fully_funded { "fully funded" } else { "partially funded" },
            if self.floor_applied { " (minimum pension applied)" } else { "" },
        )?;
        write!(f, "  Annual expense at retirement: ₹{:.2}", self.annual_expense)
    }
}

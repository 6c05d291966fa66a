//! Yearly projection output and the ordered history that owns it

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PensionError, PensionResult};
use crate::params::SimulationParameters;
use crate::settlement::{settle, Settlement};

/// Column names of a snapshot record, in export order
pub const SNAPSHOT_FIELDS: [&str; 15] = [
    "year",
    "basic_pay",
    "da_rate",
    "salary",
    "next_year_basic_pay",
    "next_year_da_rate",
    "monthly_nps_contrib",
    "monthly_ups_contrib",
    "monthly_benchmark_contrib",
    "nps_corpus",
    "ups_corpus",
    "benchmark_corpus",
    "annual_expense",
    "ups_pension",
    "nps_annuity",
];

/// State of the three corpora at the end of one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// Projection year (1-indexed)
    pub year: u32,

    // Pay for this year
    pub basic_pay: f64,
    pub da_rate: f64,
    pub salary: f64,

    // Pay carried into the following year
    pub next_year_basic_pay: f64,
    pub next_year_da_rate: f64,

    // Monthly contributions
    pub monthly_nps_contrib: f64,
    pub monthly_ups_contrib: f64,
    pub monthly_benchmark_contrib: f64,

    // Corpora after this year's compounding
    pub nps_corpus: f64,
    pub ups_corpus: f64,
    pub benchmark_corpus: f64,

    /// Inflation-adjusted annual household expense
    pub annual_expense: f64,

    // Retirement values, populated on the terminal year only
    pub ups_pension: f64,
    pub nps_annuity: f64,
}

impl YearSnapshot {
    /// Terminal-year copy carrying the retirement settlement values
    pub fn settled(&self, settlement: &Settlement) -> YearSnapshot {
        YearSnapshot {
            nps_corpus: settlement.nps_corpus,
            ups_corpus: settlement.ups_corpus,
            ups_pension: settlement.ups_pension,
            nps_annuity: settlement.nps_annuity,
            ..self.clone()
        }
    }

    /// Flat key-value record keyed by [`SNAPSHOT_FIELDS`]
    pub fn to_record(&self) -> Map<String, Value> {
        let values = [
            Value::from(self.year),
            Value::from(self.basic_pay),
            Value::from(self.da_rate),
            Value::from(self.salary),
            Value::from(self.next_year_basic_pay),
            Value::from(self.next_year_da_rate),
            Value::from(self.monthly_nps_contrib),
            Value::from(self.monthly_ups_contrib),
            Value::from(self.monthly_benchmark_contrib),
            Value::from(self.nps_corpus),
            Value::from(self.ups_corpus),
            Value::from(self.benchmark_corpus),
            Value::from(self.annual_expense),
            Value::from(self.ups_pension),
            Value::from(self.nps_annuity),
        ];

        SNAPSHOT_FIELDS
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}

/// Ordered, append-only sequence of yearly snapshots.
///
/// Snapshots are appended in year order during projection. The only later
/// change is [`CorpusHistory::calculate_pension`], which replaces the final
/// snapshot with its settled copy exactly once.
#[derive(Debug, Clone, Default)]
pub struct CorpusHistory {
    snapshots: Vec<YearSnapshot>,
    settlement: Option<Settlement>,
}

impl CorpusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(years: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(years),
            settlement: None,
        }
    }

    /// Append the next year's snapshot
    pub fn add(&mut self, snapshot: YearSnapshot) -> PensionResult<()> {
        if let Some(last) = self.settled_year() {
            return Err(PensionError::AlreadySettled { year: last });
        }

        let expected = self.snapshots.len() as u32 + 1;
        if snapshot.year != expected {
            return Err(PensionError::OutOfOrder {
                expected,
                actual: snapshot.year,
            });
        }

        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Final projected year, if any
    pub fn last(&self) -> Option<&YearSnapshot> {
        self.snapshots.last()
    }

    /// Snapshot at a 0-based position
    pub fn get(&self, index: usize) -> Option<&YearSnapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearSnapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[YearSnapshot] {
        &self.snapshots
    }

    /// One flat record per year, in chronological order
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.snapshots.iter().map(YearSnapshot::to_record).collect()
    }

    /// Settlement applied to the final year, once calculated
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    fn settled_year(&self) -> Option<u32> {
        self.settlement.as_ref().and(self.last().map(|s| s.year))
    }

    /// Settle the retirement year and write the results onto the final snapshot
    pub fn calculate_pension(&mut self, params: &SimulationParameters) -> PensionResult<&Settlement> {
        if let Some(year) = self.settled_year() {
            return Err(PensionError::AlreadySettled { year });
        }

        let last = self.snapshots.last_mut().ok_or(PensionError::EmptyHistory)?;
        let settlement = settle(last, params);
        *last = last.settled(&settlement);

        log::info!(
            "Settled retirement year {}: NPS annuity {:.2}/month, UPS pension {:.2}/month",
            last.year,
            settlement.nps_annuity,
            settlement.ups_pension,
        );

        Ok(&*self.settlement.insert(settlement))
    }
}

impl<'a> IntoIterator for &'a CorpusHistory {
    type Item = &'a YearSnapshot;
    type IntoIter = std::slice::Iter<'a, YearSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

//! Pension Compare - NPS vs UPS retirement projection for Indian government employees
//!
//! This library provides:
//! - Year-by-year projection of NPS, UPS and benchmark corpora with monthly compounding
//! - Retirement settlement: NPS lump sum and annuity, UPS lump sum and guaranteed pension
//! - Parameter loading from INI or JSON config files and employee roster CSVs
//! - CSV export of the yearly history and parallel batch runs

pub mod error;
pub mod params;
pub mod projection;
pub mod settlement;
pub mod report;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{PensionError, PensionResult};
pub use params::{GrowthAssumptions, SimulationParameters, RosterEntry};
pub use projection::{ProjectionEngine, CorpusHistory, YearSnapshot};
pub use settlement::Settlement;
pub use report::RetirementSummary;
pub use scenario::ScenarioRunner;

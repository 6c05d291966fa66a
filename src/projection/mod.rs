//! Yearly projection of the NPS, UPS and benchmark corpora

mod growth;
mod engine;
mod snapshot;

pub use growth::{calculate_salary, get_yearly_accumulated_corpus, MONTHS_PER_YEAR, NPS_CONTRIB_RATE, UPS_CONTRIB_RATE};
pub use engine::{project_year, ProjectionEngine};
pub use snapshot::{CorpusHistory, YearSnapshot, SNAPSHOT_FIELDS};

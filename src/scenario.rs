//! Scenario runner for batch projections
//!
//! Holds one set of growth assumptions and runs many independent parameter
//! sets against it. Runs share no state, so batches are fanned out with rayon.

use rayon::prelude::*;

use crate::error::PensionResult;
use crate::params::{GrowthAssumptions, RosterEntry, SimulationParameters};
use crate::projection::{CorpusHistory, ProjectionEngine};
use crate::report::RetirementSummary;

/// Settled outcome for one roster entry
#[derive(Debug, Clone)]
pub struct EmployeeOutcome {
    pub employee_id: String,
    pub summary: RetirementSummary,
}

/// Runner sharing growth assumptions across many projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let outcomes = runner.run_batch(&roster);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    assumptions: GrowthAssumptions,
}

impl ScenarioRunner {
    /// Create runner with default growth assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with custom growth assumptions
    pub fn with_assumptions(assumptions: GrowthAssumptions) -> Self {
        Self { assumptions }
    }

    /// Project and settle one parameter set under the runner's assumptions
    pub fn run(&self, params: &SimulationParameters) -> PensionResult<CorpusHistory> {
        let params = params.clone().with_assumptions(self.assumptions);
        ProjectionEngine::new(params).run()
    }

    /// Run every roster entry in parallel. Results keep roster order.
    pub fn run_batch(&self, roster: &[RosterEntry]) -> Vec<PensionResult<EmployeeOutcome>> {
        roster
            .par_iter()
            .map(|entry| {
                let history = self.run(&entry.params)?;
                Ok(EmployeeOutcome {
                    employee_id: entry.employee_id.clone(),
                    summary: RetirementSummary::from_history(&history)?,
                })
            })
            .collect()
    }

    /// Run one parameter set under several assumption sets
    pub fn run_scenarios(
        &self,
        params: &SimulationParameters,
        scenarios: &[GrowthAssumptions],
    ) -> Vec<PensionResult<CorpusHistory>> {
        scenarios
            .par_iter()
            .map(|assumptions| ProjectionEngine::new(params.clone().with_assumptions(*assumptions)).run())
            .collect()
    }

    pub fn assumptions(&self) -> &GrowthAssumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut GrowthAssumptions {
        &mut self.assumptions
    }
}

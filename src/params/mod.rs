//! Simulation parameters, growth assumptions and their loaders

mod data;
pub mod loader;

pub use data::{
    GrowthAssumptions, SimulationParameters, DEFAULT_ANNUITY_RATE, DEFAULT_BASIC_PAY_HIKE,
    DEFAULT_BENCHMARK_CORPUS_RETURN, DEFAULT_DA_HIKE, DEFAULT_NPS_RETURN,
    DEFAULT_RATE_OF_INFLATION, MAX_SERVICE_YEARS,
};
pub use loader::{
    load_assumptions, load_assumptions_from_reader, load_config, load_config_from_reader,
    load_json_assumptions_from_reader, load_json_config_from_reader, load_roster, load_roster_from_reader,
    ConfigFormat, RosterEntry,
};

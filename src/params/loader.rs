//! Load simulation parameters from an INI or JSON config file, or from an
//! employee roster CSV
//!
//! Both config formats carry a required `personal_data` section and an
//! optional `assumptions` section. INI files are read into the same
//! section/key document as JSON, so the missing-key checks and typed
//! deserialization are shared.

use super::{GrowthAssumptions, SimulationParameters};
use crate::error::{PensionError, PensionResult};
use csv::Reader;
use ini::Ini;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Section holding the per-employee inputs
pub const PERSONAL_SECTION: &str = "personal_data";

/// Optional section overriding growth assumptions
pub const ASSUMPTIONS_SECTION: &str = "assumptions";

/// Label used when a roster CSV lacks required columns
pub const ROSTER_SECTION: &str = "roster";

/// Keys that must be present in the personal data section, in CLI positional order
pub const REQUIRED_FIELDS: [&str; 7] = [
    "current_service",
    "years_to_retire",
    "current_basic_pay",
    "current_da_rate",
    "current_total_nps_corpus",
    "withdrawal_percentage",
    "current_annual_expense",
];

/// On-disk config format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; anything else is read as INI
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Ini,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PersonalData {
    current_service: u32,
    years_to_retire: u32,
    current_basic_pay: f64,
    current_da_rate: f64,
    current_total_nps_corpus: f64,
    withdrawal_percentage: f64,
    current_annual_expense: f64,
}

impl PersonalData {
    fn into_params(self, assumptions: GrowthAssumptions) -> SimulationParameters {
        SimulationParameters {
            current_service: self.current_service,
            years_to_retire: self.years_to_retire,
            current_basic_pay: self.current_basic_pay,
            current_da_rate: self.current_da_rate,
            current_total_nps_corpus: self.current_total_nps_corpus,
            withdrawal_percentage: self.withdrawal_percentage,
            current_annual_expense: self.current_annual_expense,
            assumptions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    personal_data: PersonalData,
    #[serde(default)]
    assumptions: GrowthAssumptions,
}

/// Load parameters from a config file, INI unless the extension is `.json`
///
/// ```ini
/// [personal_data]
/// current_service = 6
/// years_to_retire = 28
/// ...
///
/// [assumptions]
/// expected_nps_return = 0.09
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> PensionResult<SimulationParameters> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path);
    log::debug!("Loading {:?} config from {}", format, path.display());
    params_from_document(read_document(path, format)?)
}

/// Load parameters from any reader holding an INI config
pub fn load_config_from_reader<R: Read>(mut reader: R) -> PensionResult<SimulationParameters> {
    params_from_document(ini_document(&Ini::read_from(&mut reader)?))
}

/// Load parameters from any reader holding a JSON config document
///
/// ```json
/// {
///   "personal_data": { "current_service": 6, "years_to_retire": 28, ... },
///   "assumptions": { "expected_nps_return": 0.09 }
/// }
/// ```
pub fn load_json_config_from_reader<R: Read>(reader: R) -> PensionResult<SimulationParameters> {
    params_from_document(serde_json::from_reader(reader)?)
}

/// Load only the growth assumptions section of a config file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> PensionResult<GrowthAssumptions> {
    let path = path.as_ref();
    assumptions_from_document(read_document(path, ConfigFormat::from_path(path))?)
}

/// Load the growth assumptions section of an INI config; defaults when absent
pub fn load_assumptions_from_reader<R: Read>(mut reader: R) -> PensionResult<GrowthAssumptions> {
    assumptions_from_document(ini_document(&Ini::read_from(&mut reader)?))
}

/// Load the growth assumptions section of a JSON config; defaults when absent
pub fn load_json_assumptions_from_reader<R: Read>(reader: R) -> PensionResult<GrowthAssumptions> {
    assumptions_from_document(serde_json::from_reader(reader)?)
}

fn read_document(path: &Path, format: ConfigFormat) -> PensionResult<Value> {
    let mut reader = BufReader::new(File::open(path)?);
    match format {
        ConfigFormat::Json => Ok(serde_json::from_reader(reader)?),
        ConfigFormat::Ini => Ok(ini_document(&Ini::read_from(&mut reader)?)),
    }
}

/// Sections become objects; keys are lowercased and values parsed as numbers
/// where they can be
fn ini_document(ini: &Ini) -> Value {
    let mut document = Map::new();
    for (section, properties) in ini.iter() {
        // Keys above the first section header are ignored
        let Some(section) = section else { continue };
        let entries: Map<String, Value> = properties
            .iter()
            .map(|(key, raw)| (key.to_ascii_lowercase(), ini_value(raw)))
            .collect();
        document.insert(section.to_string(), Value::Object(entries));
    }
    Value::Object(document)
}

fn ini_value(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Value::from(number),
        _ => Value::from(raw),
    }
}

fn params_from_document(document: Value) -> PensionResult<SimulationParameters> {
    let missing: Vec<String> = match document.get(PERSONAL_SECTION).and_then(Value::as_object) {
        Some(section) => REQUIRED_FIELDS
            .iter()
            .filter(|field| !section.contains_key(**field))
            .map(|field| field.to_string())
            .collect(),
        None => REQUIRED_FIELDS.iter().map(|field| field.to_string()).collect(),
    };
    if !missing.is_empty() {
        return Err(PensionError::MissingFields {
            section: PERSONAL_SECTION,
            fields: missing,
        });
    }

    if document.get(ASSUMPTIONS_SECTION).is_none() {
        log::debug!("No [{}] section, using default growth assumptions", ASSUMPTIONS_SECTION);
    }

    let config: ConfigFile = serde_json::from_value(document)?;
    Ok(config.personal_data.into_params(config.assumptions))
}

fn assumptions_from_document(mut document: Value) -> PensionResult<GrowthAssumptions> {
    match document.get_mut(ASSUMPTIONS_SECTION).map(Value::take) {
        Some(section) => Ok(serde_json::from_value(section)?),
        None => Ok(GrowthAssumptions::default()),
    }
}

/// Raw CSV row of an employee roster
#[derive(Debug, Deserialize)]
struct RosterRow {
    employee_id: String,
    current_service: u32,
    years_to_retire: u32,
    current_basic_pay: f64,
    current_da_rate: f64,
    current_total_nps_corpus: f64,
    withdrawal_percentage: f64,
    current_annual_expense: f64,
}

impl RosterRow {
    fn into_entry(self) -> RosterEntry {
        let personal = PersonalData {
            current_service: self.current_service,
            years_to_retire: self.years_to_retire,
            current_basic_pay: self.current_basic_pay,
            current_da_rate: self.current_da_rate,
            current_total_nps_corpus: self.current_total_nps_corpus,
            withdrawal_percentage: self.withdrawal_percentage,
            current_annual_expense: self.current_annual_expense,
        };
        RosterEntry {
            employee_id: self.employee_id,
            params: personal.into_params(GrowthAssumptions::default()),
        }
    }
}

/// One employee's parameters from a roster file
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub employee_id: String,
    pub params: SimulationParameters,
}

/// Load all roster rows from a CSV file, with default growth assumptions
pub fn load_roster<P: AsRef<Path>>(path: P) -> PensionResult<Vec<RosterEntry>> {
    let reader = Reader::from_path(path)?;
    collect_roster(reader)
}

/// Load roster rows from any reader (e.g. string buffer)
pub fn load_roster_from_reader<R: Read>(reader: R) -> PensionResult<Vec<RosterEntry>> {
    collect_roster(Reader::from_reader(reader))
}

fn collect_roster<R: Read>(mut reader: Reader<R>) -> PensionResult<Vec<RosterEntry>> {
    let headers = reader.headers()?;
    let missing: Vec<String> = std::iter::once("employee_id")
        .chain(REQUIRED_FIELDS)
        .filter(|column| !headers.iter().any(|header| header == *column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PensionError::MissingFields {
            section: ROSTER_SECTION,
            fields: missing,
        });
    }

    let mut entries = Vec::new();
    let mut skipped = 0;

    for result in reader.deserialize::<RosterRow>() {
        match result {
            Ok(row) => entries.push(row.into_entry()),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|pos| pos.line()).unwrap_or_default();
                log::warn!("Skipping roster line {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    log::info!("Loaded {} roster entries ({} skipped)", entries.len(), skipped);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_INI: &str = "\
[personal_data]
current_service = 6
years_to_retire = 28
current_basic_pay = 59600
current_da_rate = 0.55
current_total_nps_corpus = 1800000
withdrawal_percentage = 0.6
current_annual_expense = 30000

[assumptions]
expected_nps_return = 0.09
expected_rate_of_inflation = 0.06
";

    const FULL_CONFIG: &str = r#"{
        "personal_data": {
            "current_service": 6,
            "years_to_retire": 28,
            "current_basic_pay": 59600,
            "current_da_rate": 0.55,
            "current_total_nps_corpus": 1800000,
            "withdrawal_percentage": 0.6,
            "current_annual_expense": 30000
        },
        "assumptions": {
            "expected_nps_return": 0.09,
            "expected_rate_of_inflation": 0.06
        }
    }"#;

    #[test]
    fn test_load_full_ini_config() {
        let params = load_config_from_reader(FULL_INI.as_bytes()).expect("config should load");
        assert_eq!(params.current_service, 6);
        assert_eq!(params.years_to_retire, 28);
        assert_eq!(params.current_basic_pay, 59600.0);
        assert_eq!(params.current_da_rate, 0.55);
        assert_eq!(params.withdrawal_percentage, 0.6);
        assert_eq!(params.assumptions.expected_nps_return, 0.09);
        assert_eq!(params.assumptions.expected_rate_of_inflation, 0.06);
        assert_eq!(params.assumptions.expected_benchmark_corpus_return, 0.08);
    }

    #[test]
    fn test_ini_and_json_configs_agree() {
        let from_ini = load_config_from_reader(FULL_INI.as_bytes()).unwrap();
        let from_json = load_json_config_from_reader(FULL_CONFIG.as_bytes()).unwrap();
        assert_eq!(from_ini, from_json);
    }

    #[test]
    fn test_ini_missing_fields_reported_together() {
        let ini = "\
[personal_data]
current_service = 10
current_basic_pay = 50000
current_da_rate = 0.5
current_total_nps_corpus = 1000000
current_annual_expense = 300000
";
        match load_config_from_reader(ini.as_bytes()) {
            Err(PensionError::MissingFields { section, fields }) => {
                assert_eq!(section, "personal_data");
                assert_eq!(fields, vec!["years_to_retire", "withdrawal_percentage"]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_ini_missing_personal_section() {
        let ini = "[assumptions]\nexpected_nps_return = 0.1\n";
        match load_config_from_reader(ini.as_bytes()) {
            Err(PensionError::MissingFields { section, fields }) => {
                assert_eq!(section, "personal_data");
                assert_eq!(fields.len(), 7);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_ini_bad_value_rejected() {
        let ini = FULL_INI.replace("years_to_retire = 28", "years_to_retire = soon");
        let result = load_config_from_reader(ini.as_bytes());
        assert!(matches!(result, Err(PensionError::Json(_))));
    }

    #[test]
    fn test_ini_assumptions_only() {
        let assumptions = load_assumptions_from_reader(FULL_INI.as_bytes()).unwrap();
        assert_eq!(assumptions.expected_nps_return, 0.09);
        assert_eq!(assumptions.expected_da_hike, 0.05);

        let assumptions = load_assumptions_from_reader("".as_bytes()).unwrap();
        assert_eq!(assumptions, GrowthAssumptions::default());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("config.ini")), ConfigFormat::Ini);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Ini);
        assert_eq!(ConfigFormat::from_path(Path::new("config.JSON")), ConfigFormat::Json);
    }

    #[test]
    fn test_load_ini_config_from_path() {
        let path = std::env::temp_dir().join(format!("pension_compare_config_{}.ini", std::process::id()));
        std::fs::write(&path, FULL_INI).unwrap();
        let params = load_config(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(params.unwrap().years_to_retire, 28);
    }

    #[test]
    fn test_load_full_config() {
        let params = load_json_config_from_reader(FULL_CONFIG.as_bytes()).expect("config should load");
        assert_eq!(params.current_service, 6);
        assert_eq!(params.years_to_retire, 28);
        assert_eq!(params.current_basic_pay, 59600.0);
        assert_eq!(params.assumptions.expected_nps_return, 0.09);
        assert_eq!(params.assumptions.expected_rate_of_inflation, 0.06);
        // Unspecified assumptions keep their defaults
        assert_eq!(params.assumptions.expected_benchmark_corpus_return, 0.08);
    }

    #[test]
    fn test_assumptions_section_optional() {
        let json = r#"{"personal_data": {
            "current_service": 10, "years_to_retire": 5, "current_basic_pay": 50000,
            "current_da_rate": 0.5, "current_total_nps_corpus": 1000000,
            "withdrawal_percentage": 0.6, "current_annual_expense": 300000
        }}"#;
        let params = load_json_config_from_reader(json.as_bytes()).unwrap();
        assert_eq!(params.assumptions, GrowthAssumptions::default());
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let json = r#"{"personal_data": {
            "current_service": 10, "current_basic_pay": 50000,
            "current_da_rate": 0.5, "current_total_nps_corpus": 1000000,
            "current_annual_expense": 300000
        }}"#;
        match load_json_config_from_reader(json.as_bytes()) {
            Err(PensionError::MissingFields { section, fields }) => {
                assert_eq!(section, "personal_data");
                assert_eq!(fields, vec!["years_to_retire", "withdrawal_percentage"]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_section() {
        let json = r#"{"assumptions": {"expected_nps_return": 0.1}}"#;
        match load_json_config_from_reader(json.as_bytes()) {
            Err(PensionError::MissingFields { fields, .. }) => assert_eq!(fields.len(), 7),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        let result = load_json_config_from_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(PensionError::Json(_))));
    }

    #[test]
    fn test_load_assumptions_only() {
        let assumptions = load_json_assumptions_from_reader(FULL_CONFIG.as_bytes()).unwrap();
        assert_eq!(assumptions.expected_nps_return, 0.09);
        assert_eq!(assumptions.expected_da_hike, 0.05);

        let json = r#"{"assumptions": {"expected_annuity_rate": 0.07}}"#;
        let assumptions = load_json_assumptions_from_reader(json.as_bytes()).unwrap();
        assert_eq!(assumptions.expected_annuity_rate, 0.07);

        let assumptions = load_json_assumptions_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(assumptions, GrowthAssumptions::default());
    }

    #[test]
    fn test_load_roster() {
        let csv = "\
employee_id,current_service,years_to_retire,current_basic_pay,current_da_rate,current_total_nps_corpus,withdrawal_percentage,current_annual_expense
E001,10,5,50000,0.5,1000000,0.6,300000
E002,6,28,59600,0.55,1800000,0.6,30000
";
        let roster = load_roster_from_reader(csv.as_bytes()).expect("roster should load");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].employee_id, "E001");
        assert_eq!(roster[1].params.years_to_retire, 28);
        assert_eq!(roster[1].params.current_da_rate, 0.55);
    }

    #[test]
    fn test_roster_skips_malformed_rows() {
        let csv = "\
employee_id,current_service,years_to_retire,current_basic_pay,current_da_rate,current_total_nps_corpus,withdrawal_percentage,current_annual_expense
E001,10,5,50000,0.5,1000000,0.6,300000
E002,6,-1,59600,0.55,1800000,0.6,30000
E003,4,20,56100,0.5,900000,0.6,250000
";
        let roster = load_roster_from_reader(csv.as_bytes()).expect("roster should load");
        let ids: Vec<_> = roster.iter().map(|entry| entry.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E001", "E003"]);
    }

    #[test]
    fn test_roster_missing_columns() {
        let csv = "employee_id,current_service,years_to_retire\nE001,10,5\n";
        match load_roster_from_reader(csv.as_bytes()) {
            Err(PensionError::MissingFields { section, fields }) => {
                assert_eq!(section, "roster");
                assert_eq!(fields.len(), 5);
                assert_eq!(fields[0], "current_basic_pay");
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }
}

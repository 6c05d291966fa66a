//! Error types for projection, settlement and I/O

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PensionError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Corpus history is empty: no retirement year to settle")]
    EmptyHistory,

    #[error("Retirement settlement already applied to year {year}")]
    AlreadySettled { year: u32 },

    #[error("Snapshot out of order: expected year {expected}, got {actual}")]
    OutOfOrder { expected: u32, actual: u32 },

    #[error("Missing field(s) in [{section}] section: {}", .fields.join(", "))]
    MissingFields {
        section: &'static str,
        fields: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("INI error: {0}")]
    Ini(#[from] ini::Error),
}

impl PensionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PensionError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type PensionResult<T> = Result<T, PensionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_all() {
        let err = PensionError::MissingFields {
            section: "personal_data",
            fields: vec!["years_to_retire".to_string(), "current_da_rate".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing field(s) in [personal_data] section: years_to_retire, current_da_rate"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = PensionError::invalid("withdrawal_percentage", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'withdrawal_percentage': must be within [0, 1], got 1.5"
        );
    }
}

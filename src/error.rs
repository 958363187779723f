use crate::data::model::Category;

/// A record that parsed but breaks a field rule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("value must be a non-negative number, got {0}")]
    InvalidValue(f64),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("timestamp is empty")]
    EmptyTimestamp,

    #[error("substance name is required for chemical measurements")]
    MissingSubstance,
}

/// Why a single imported row was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("column '{column}' is not a number: '{raw}'")]
    NotNumeric { column: &'static str, raw: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid measurement: {0}")]
    Validation(#[from] ValidationError),

    #[error("{category} import is missing required column(s): {}", missing.join(", "))]
    Schema {
        category: Category,
        missing: Vec<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no measurements to put on the map")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

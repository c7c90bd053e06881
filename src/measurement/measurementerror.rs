use thiserror::Error;

/// Failure taxonomy of the measurement engine. Only malformed inputs are
/// errors: per-candidate geometric rejection inside the intersection search
/// is normal filtering and never surfaces here.
#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("invalid curve parameter: {0}")]
    InvalidParameter(String),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),
}

use thiserror::Error;

/// Errors that can occur in co-digestion kinetics calculations.
#[derive(Error, Debug)]
pub enum KineticsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown ratio: {name}. Available: {}", .available.join(", "))]
    UnknownRatio { name: String, available: Vec<String> },

    #[error("Invalid ratio: {0}")]
    InvalidRatio(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Plot error: {0}")]
    Plot(String),
}

impl From<toml::de::Error> for KineticsError {
    fn from(e: toml::de::Error) -> Self {
        KineticsError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for KineticsError {
    fn from(e: toml::ser::Error) -> Self {
        KineticsError::Config(e.to_string())
    }
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VatMonError {
    #[error("input is missing required column(s): {}. Expected at least 'Country' and 'Sales_EUR'", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error(
        "invalid record{}: {reason}",
        line.map_or_else(String::new, |l| format!(" on line {l}"))
    )]
    InvalidRecord { line: Option<usize>, reason: String },

    #[error("invalid threshold configuration: {0}")]
    ConfigInvalid(String),

    #[error("failed to load threshold preset from {path}: {reason}")]
    PresetLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

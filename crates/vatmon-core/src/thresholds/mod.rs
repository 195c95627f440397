pub mod builtin;
pub mod schema;

use crate::error::VatMonError;
use schema::ThresholdDef;
use std::path::Path;

/// Load a threshold definition from a JSON file.
pub fn load_threshold_file(path: &Path) -> Result<ThresholdDef, VatMonError> {
    let content = std::fs::read_to_string(path).map_err(|e| VatMonError::PresetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let def: ThresholdDef = serde_json::from_str(&content).map_err(|e| VatMonError::PresetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_threshold(&def)?;
    Ok(def)
}

/// Parse a threshold definition from a JSON string.
pub fn parse_threshold_str(json: &str) -> Result<ThresholdDef, VatMonError> {
    let def: ThresholdDef = serde_json::from_str(json)?;
    validate_threshold(&def)?;
    Ok(def)
}

/// Validate that a threshold definition is usable.
pub fn validate_threshold(def: &ThresholdDef) -> Result<(), VatMonError> {
    if def.name.trim().is_empty() {
        return Err(VatMonError::ConfigInvalid("name must not be empty".into()));
    }
    def.config().validate()
}

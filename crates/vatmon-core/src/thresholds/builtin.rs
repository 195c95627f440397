use crate::error::VatMonError;
use crate::thresholds::parse_threshold_str;
use crate::thresholds::schema::ThresholdDef;

const EU_OSS_JSON: &str = include_str!("../../../../presets/eu-oss.json");
const US_NEXUS_JSON: &str = include_str!("../../../../presets/us-nexus.json");

/// Available predefined thresholds.
pub const PRESETS: &[&str] = &["eu-oss", "us-nexus"];

/// Preset used when neither a preset nor a config file is given.
pub const DEFAULT_PRESET: &str = "eu-oss";

/// Load a predefined threshold by name.
pub fn load_preset(name: &str) -> Result<ThresholdDef, VatMonError> {
    match name {
        "eu-oss" => parse_threshold_str(EU_OSS_JSON),
        "us-nexus" => parse_threshold_str(US_NEXUS_JSON),
        _ => Err(VatMonError::ConfigInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

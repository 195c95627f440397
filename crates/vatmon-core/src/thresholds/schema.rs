use crate::model::{default_warning_ratio, ThresholdConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named registration threshold, as stored in a preset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Currency the limit is expressed in (display only, no conversion).
    #[serde(default)]
    pub currency: Option<String>,
    /// Limit as a decimal string (e.g. "10000").
    pub limit: Decimal,
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: Decimal,
}

impl ThresholdDef {
    pub fn config(&self) -> ThresholdConfig {
        ThresholdConfig {
            limit: self.limit,
            warning_ratio: self.warning_ratio,
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VatMonError;

/// One sales row: a jurisdiction and the amount sold there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub jurisdiction: String,
    pub amount: Decimal,
}

impl SalesRecord {
    /// Build a record, rejecting an empty jurisdiction or a negative amount.
    pub fn new(jurisdiction: impl Into<String>, amount: Decimal) -> Result<Self, VatMonError> {
        let jurisdiction = jurisdiction.into();
        if jurisdiction.trim().is_empty() {
            return Err(VatMonError::InvalidRecord {
                line: None,
                reason: "jurisdiction must not be empty".into(),
            });
        }
        if amount < Decimal::ZERO {
            return Err(VatMonError::InvalidRecord {
                line: None,
                reason: format!("amount {amount} for '{jurisdiction}' is negative"),
            });
        }
        Ok(SalesRecord {
            jurisdiction,
            amount,
        })
    }
}

/// Summed sales for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTotal {
    pub jurisdiction: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Breached,
    Approaching,
    Safe,
}

impl ComplianceStatus {
    /// Short alert label used by list renderers.
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Breached => "LIMIT EXCEEDED",
            ComplianceStatus::Approaching => "Approaching limit",
            ComplianceStatus::Safe => "Safe",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Breached => write!(f, "Breached"),
            ComplianceStatus::Approaching => write!(f, "Approaching"),
            ComplianceStatus::Safe => write!(f, "Safe"),
        }
    }
}

/// Registration threshold for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Revenue at or above which registration is required.
    pub limit: Decimal,
    /// Fraction of `limit` from which a jurisdiction counts as approaching.
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: Decimal,
}

/// The reference warning ratio (80% of the limit).
pub fn default_warning_ratio() -> Decimal {
    Decimal::new(8, 1)
}

impl Default for ThresholdConfig {
    /// EU distance-selling (OSS) threshold.
    fn default() -> Self {
        ThresholdConfig {
            limit: Decimal::new(10_000, 0),
            warning_ratio: default_warning_ratio(),
        }
    }
}

impl ThresholdConfig {
    pub fn new(limit: Decimal, warning_ratio: Decimal) -> Result<Self, VatMonError> {
        let config = ThresholdConfig {
            limit,
            warning_ratio,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the limit is non-negative and the ratio lies in (0, 1].
    pub fn validate(&self) -> Result<(), VatMonError> {
        if self.limit < Decimal::ZERO {
            return Err(VatMonError::ConfigInvalid(format!(
                "limit {} must not be negative",
                self.limit
            )));
        }
        if self.warning_ratio <= Decimal::ZERO || self.warning_ratio > Decimal::ONE {
            return Err(VatMonError::ConfigInvalid(format!(
                "warning ratio {} must be greater than 0 and at most 1",
                self.warning_ratio
            )));
        }
        Ok(())
    }

    /// Lower edge of the approaching band (`limit * warning_ratio`).
    pub fn warning_floor(&self) -> Decimal {
        self.limit * self.warning_ratio
    }
}

/// Headline counters derived from a classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_revenue: Decimal,
    pub breached_count: usize,
    pub approaching_count: usize,
    pub safe_count: usize,
}

impl SummaryMetrics {
    pub fn jurisdiction_count(&self) -> usize {
        self.breached_count + self.approaching_count + self.safe_count
    }
}

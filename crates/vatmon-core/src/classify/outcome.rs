use crate::model::{ComplianceStatus, SummaryMetrics, ThresholdConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Classification of a single jurisdiction total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionResult {
    /// Jurisdiction name exactly as it appeared in the input.
    pub jurisdiction: String,
    /// Summed sales for the jurisdiction.
    pub total: Decimal,
    /// Assigned registration status.
    pub status: ComplianceStatus,
    /// Human-readable explanation of the comparison.
    pub reason: String,
}

/// Output of one classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The threshold the totals were compared against.
    pub threshold: ThresholdConfig,
    /// One entry per jurisdiction, in input order.
    pub jurisdictions: Vec<JurisdictionResult>,
    pub summary: SummaryMetrics,
}

impl Classification {
    /// Results ordered for an alert list: breached first, then approaching,
    /// then safe; larger totals first within a status.
    pub fn by_severity(&self) -> Vec<&JurisdictionResult> {
        let mut sorted: Vec<&JurisdictionResult> = self.jurisdictions.iter().collect();
        sorted.sort_by(|a, b| {
            (a.status, Reverse(a.total), &a.jurisdiction).cmp(&(
                b.status,
                Reverse(b.total),
                &b.jurisdiction,
            ))
        });
        sorted
    }

    pub fn with_status(&self, status: ComplianceStatus) -> Vec<&JurisdictionResult> {
        self.jurisdictions
            .iter()
            .filter(|r| r.status == status)
            .collect()
    }
}

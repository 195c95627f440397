use crate::classify::classify;
use crate::error::VatMonError;
use crate::model::{JurisdictionTotal, SummaryMetrics, ThresholdConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary of one what-if limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    pub threshold: ThresholdConfig,
    pub summary: SummaryMetrics,
    /// Jurisdictions at or above the limit under this scenario.
    pub breached: Vec<String>,
}

/// Classify the same totals against each limit in turn.
///
/// Points come back in the order of `limits`. Every limit is validated with
/// `warning_ratio` before any classification runs.
pub fn sweep(
    totals: &[JurisdictionTotal],
    limits: &[Decimal],
    warning_ratio: Decimal,
) -> Result<Vec<ScenarioPoint>, VatMonError> {
    let configs = limits
        .iter()
        .map(|&limit| ThresholdConfig::new(limit, warning_ratio))
        .collect::<Result<Vec<_>, _>>()?;

    configs
        .iter()
        .map(|config| {
            let c = classify(totals, config)?;
            Ok(ScenarioPoint {
                threshold: *config,
                breached: c
                    .with_status(crate::model::ComplianceStatus::Breached)
                    .into_iter()
                    .map(|r| r.jurisdiction.clone())
                    .collect(),
                summary: c.summary,
            })
        })
        .collect()
}

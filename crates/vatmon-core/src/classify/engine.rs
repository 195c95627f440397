use crate::aggregate::overflow;
use crate::classify::outcome::{Classification, JurisdictionResult};
use crate::error::VatMonError;
use crate::model::{ComplianceStatus, JurisdictionTotal, SummaryMetrics, ThresholdConfig};
use rust_decimal::Decimal;

/// Classify jurisdiction totals against a registration threshold.
///
/// Pure and deterministic: the same totals and config always give the same
/// result. Results keep the order of `totals`. Fails only if the summed
/// revenue does not fit in a `Decimal`, which cannot happen for totals
/// produced by `aggregate`.
pub fn classify(
    totals: &[JurisdictionTotal],
    config: &ThresholdConfig,
) -> Result<Classification, VatMonError> {
    let jurisdictions: Vec<JurisdictionResult> = totals
        .iter()
        .map(|t| classify_total(t, config))
        .collect();
    let summary = summarize(&jurisdictions)?;

    Ok(Classification {
        threshold: *config,
        jurisdictions,
        summary,
    })
}

/// Status for a single total. Both band edges are inclusive on the low side.
pub fn status_for(total: Decimal, config: &ThresholdConfig) -> ComplianceStatus {
    if total >= config.limit {
        ComplianceStatus::Breached
    } else if total >= config.warning_floor() {
        ComplianceStatus::Approaching
    } else {
        ComplianceStatus::Safe
    }
}

fn classify_total(t: &JurisdictionTotal, config: &ThresholdConfig) -> JurisdictionResult {
    let status = status_for(t.total, config);
    let floor = config.warning_floor().normalize();
    let limit = config.limit.normalize();
    let total = t.total.normalize();

    let reason = match status {
        ComplianceStatus::Breached => format!(
            "{}: {} >= limit {} -> registration required",
            t.jurisdiction, total, limit
        ),
        ComplianceStatus::Approaching => format!(
            "{}: {} >= warning level {} but < limit {} -> approaching",
            t.jurisdiction, total, floor, limit
        ),
        ComplianceStatus::Safe => format!(
            "{}: {} < warning level {} -> safe",
            t.jurisdiction, total, floor
        ),
    };

    JurisdictionResult {
        jurisdiction: t.jurisdiction.clone(),
        total: t.total,
        status,
        reason,
    }
}

fn summarize(results: &[JurisdictionResult]) -> Result<SummaryMetrics, VatMonError> {
    let mut summary = SummaryMetrics::default();
    for r in results {
        summary.total_revenue = summary
            .total_revenue
            .checked_add(r.total)
            .ok_or_else(|| overflow("total revenue across all jurisdictions"))?;
        match r.status {
            ComplianceStatus::Breached => summary.breached_count += 1,
            ComplianceStatus::Approaching => summary.approaching_count += 1,
            ComplianceStatus::Safe => summary.safe_count += 1,
        }
    }
    Ok(summary)
}

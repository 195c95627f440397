use crate::error::VatMonError;
use crate::model::{JurisdictionTotal, SalesRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum sales per jurisdiction.
///
/// Grouping is an exact, case-sensitive match on the jurisdiction name.
/// Output is sorted by name; every input jurisdiction appears exactly once.
/// Fails with `InvalidRecord` if a jurisdiction's total, or the grand total
/// across all jurisdictions, does not fit in a `Decimal`.
pub fn aggregate(records: &[SalesRecord]) -> Result<Vec<JurisdictionTotal>, VatMonError> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut grand_total = Decimal::ZERO;
    for record in records {
        let total = totals.entry(record.jurisdiction.as_str()).or_default();
        *total = total
            .checked_add(record.amount)
            .ok_or_else(|| overflow(&format!("sales for '{}'", record.jurisdiction)))?;
        grand_total = grand_total
            .checked_add(record.amount)
            .ok_or_else(|| overflow("total sales across all jurisdictions"))?;
    }

    Ok(totals
        .into_iter()
        .map(|(jurisdiction, total)| JurisdictionTotal {
            jurisdiction: jurisdiction.to_string(),
            total,
        })
        .collect())
}

pub(crate) fn overflow(what: &str) -> VatMonError {
    VatMonError::InvalidRecord {
        line: None,
        reason: format!("{what} exceed the largest representable amount"),
    }
}

/// Find jurisdictions that differ only by case or whitespace.
///
/// These are kept apart by `aggregate` and reported here so the caller can
/// warn about them (e.g. "Germany" and "germany " split one market in two).
/// Each returned group is sorted and has at least two names.
pub fn similar_jurisdictions(totals: &[JurisdictionTotal]) -> Vec<Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for t in totals {
        groups
            .entry(loose_key(&t.jurisdiction))
            .or_default()
            .push(t.jurisdiction.clone());
    }

    groups
        .into_values()
        .filter(|names| names.len() > 1)
        .map(|mut names| {
            names.sort();
            names.dedup();
            names
        })
        .filter(|names| names.len() > 1)
        .collect()
}

fn loose_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(jurisdiction: &str, amount: Decimal) -> SalesRecord {
        SalesRecord {
            jurisdiction: jurisdiction.into(),
            amount,
        }
    }

    #[test]
    fn test_groups_and_sums() {
        let totals = aggregate(&[
            rec("Germany", dec!(5000)),
            rec("Germany", dec!(7500)),
            rec("France", dec!(8200)),
        ])
        .unwrap();
        assert_eq!(
            totals,
            vec![
                JurisdictionTotal {
                    jurisdiction: "France".into(),
                    total: dec!(8200)
                },
                JurisdictionTotal {
                    jurisdiction: "Germany".into(),
                    total: dec!(12500)
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_no_float_drift() {
        let records: Vec<_> = (0..1000).map(|_| rec("Spain", dec!(0.1))).collect();
        let totals = aggregate(&records).unwrap();
        assert_eq!(totals[0].total, dec!(100.0));
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let totals = aggregate(&[rec("Germany", dec!(1)), rec("germany", dec!(2))]).unwrap();
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_totals_preserve_grand_sum() {
        let records = vec![
            rec("Italy", dec!(26000)),
            rec("Poland", dec!(4000.25)),
            rec("Italy", dec!(0.75)),
            rec("Belgium", dec!(300)),
        ];
        let input_sum: Decimal = records.iter().map(|r| r.amount).sum();
        let output_sum: Decimal = aggregate(&records).unwrap().iter().map(|t| t.total).sum();
        assert_eq!(input_sum, output_sum);
    }

    #[test]
    fn test_overflowing_jurisdiction_total_is_error() {
        let big = Decimal::MAX - dec!(1);
        let err = aggregate(&[rec("Germany", big), rec("Germany", big)]).unwrap_err();
        match err {
            VatMonError::InvalidRecord { reason, .. } => assert!(reason.contains("Germany")),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_grand_total_is_error() {
        let big = Decimal::MAX - dec!(1);
        assert!(matches!(
            aggregate(&[rec("Germany", big), rec("France", big)]),
            Err(VatMonError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_similar_jurisdictions_flagged() {
        let totals = aggregate(&[
            rec("Germany", dec!(1)),
            rec("germany ", dec!(2)),
            rec("Costa  Rica", dec!(3)),
            rec("costa rica", dec!(4)),
            rec("France", dec!(5)),
        ])
        .unwrap();
        let groups = similar_jurisdictions(&totals);
        assert_eq!(groups.len(), 2);
        assert!(groups.contains(&vec!["Germany".to_string(), "germany ".to_string()]));
        assert!(groups.contains(&vec!["Costa  Rica".to_string(), "costa rica".to_string()]));
    }

    #[test]
    fn test_no_similar_jurisdictions() {
        let totals = aggregate(&[rec("Austria", dec!(1)), rec("Australia", dec!(2))]).unwrap();
        assert!(similar_jurisdictions(&totals).is_empty());
    }
}

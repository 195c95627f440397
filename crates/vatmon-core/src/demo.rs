use crate::model::SalesRecord;
use rust_decimal::Decimal;

const DEMO_SALES: &[(&str, i64)] = &[
    ("Germany", 12_500),
    ("France", 8_200),
    ("Austria", 15_000),
    ("Spain", 9_500),
    ("Italy", 26_000),
    ("Poland", 4_000),
    ("Netherlands", 11_000),
    ("Belgium", 300),
];

/// Sample EU sales used when no input file is supplied.
pub fn records() -> Vec<SalesRecord> {
    DEMO_SALES
        .iter()
        .map(|&(jurisdiction, amount)| SalesRecord {
            jurisdiction: jurisdiction.to_string(),
            amount: Decimal::from(amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_totals() {
        let records = records();
        assert_eq!(records.len(), 8);
        let sum: Decimal = records.iter().map(|r| r.amount).sum();
        assert_eq!(sum, dec!(86500));
    }
}

use crate::error::VatMonError;

/// Column holding the jurisdiction name.
pub const JURISDICTION_COLUMN: &str = "Country";
/// Column holding the sales amount in EUR.
pub const AMOUNT_COLUMN: &str = "Sales_EUR";

/// Positions of the required columns within a table's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub jurisdiction: usize,
    pub amount: usize,
}

/// Locate the required columns in a header row.
///
/// Names must match exactly after trimming whitespace and a leading UTF-8
/// BOM. Extra columns are ignored. If several columns share a required name
/// the first one wins.
pub fn locate_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap, VatMonError> {
    let position = |wanted: &str| {
        headers
            .iter()
            .position(|h| clean_header(h.as_ref()) == wanted)
    };

    let jurisdiction = position(JURISDICTION_COLUMN);
    let amount = position(AMOUNT_COLUMN);

    match (jurisdiction, amount) {
        (Some(jurisdiction), Some(amount)) => Ok(ColumnMap {
            jurisdiction,
            amount,
        }),
        _ => {
            let mut missing = Vec::new();
            if jurisdiction.is_none() {
                missing.push(JURISDICTION_COLUMN.to_string());
            }
            if amount.is_none() {
                missing.push(AMOUNT_COLUMN.to_string());
            }
            Err(VatMonError::Schema { missing })
        }
    }
}

fn clean_header(h: &str) -> &str {
    h.trim_start_matches('\u{feff}').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_required_columns() {
        let map = locate_columns(&["Country", "Sales_EUR"]).unwrap();
        assert_eq!(map, ColumnMap { jurisdiction: 0, amount: 1 });
    }

    #[test]
    fn test_extra_columns_ignored() {
        let map =
            locate_columns(&["Audit_Date", "Sales_EUR", "Transactions", "Country"]).unwrap();
        assert_eq!(map.jurisdiction, 3);
        assert_eq!(map.amount, 1);
    }

    #[test]
    fn test_bom_and_whitespace_tolerated() {
        let map = locate_columns(&["\u{feff}Country", " Sales_EUR "]).unwrap();
        assert_eq!(map, ColumnMap { jurisdiction: 0, amount: 1 });
    }

    #[test]
    fn test_missing_amount_column() {
        let err = locate_columns(&["Country", "Revenue"]).unwrap_err();
        match err {
            VatMonError::Schema { missing } => assert_eq!(missing, vec!["Sales_EUR"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_both_missing_reported() {
        let err = locate_columns::<&str>(&[]).unwrap_err();
        match err {
            VatMonError::Schema { missing } => assert_eq!(missing.len(), 2),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        assert!(locate_columns(&["country", "sales_eur"]).is_err());
    }
}

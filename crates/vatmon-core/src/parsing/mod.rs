pub mod header;
pub mod values;
pub mod xlsx;

use crate::error::VatMonError;
use crate::model::SalesRecord;
use header::locate_columns;
use serde::{Deserialize, Serialize};
use values::{parse_amount, parse_jurisdiction, CellError};

/// Raw tabular input: a header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Source lines whose bytes were not valid UTF-8. Their cells in `rows`
    /// hold a lossy decoding and never become records.
    pub non_utf8_lines: Vec<usize>,
}

/// What to do with a row whose jurisdiction or amount is unusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Drop the row, record it in `ParsedRecords::skipped_rows`, continue.
    #[default]
    Skip,
    /// Fail the whole run on the first bad row.
    Strict,
}

/// A data row that was dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source, counting the header as line 1.
    pub line: usize,
    pub cells: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecords {
    pub records: Vec<SalesRecord>,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Read a delimited text table (header row required).
///
/// Rows may have differing lengths; missing cells read as empty. A data row
/// that is not valid UTF-8 is kept and listed in `non_utf8_lines` so that
/// `to_records` can apply the record policy to it.
pub fn read_csv(bytes: &[u8], delimiter: u8) -> Result<SalesTable, VatMonError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| VatMonError::ParseError(format!("failed to read header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = SalesTable {
        headers,
        ..SalesTable::default()
    };
    for (i, result) in reader.byte_records().enumerate() {
        let line = i + 2;
        let record = result
            .map_err(|e| VatMonError::ParseError(format!("CSV error at line {line}: {e}")))?;

        let decoded: Result<Vec<&str>, _> = record.iter().map(std::str::from_utf8).collect();
        let cells = match decoded {
            Ok(cells) => cells.into_iter().map(str::to_string).collect(),
            Err(_) => {
                table.non_utf8_lines.push(line);
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect()
            }
        };
        table.rows.push(cells);
    }

    Ok(table)
}

/// Validate a table's schema and convert its rows into `SalesRecord`s.
///
/// A missing required column is fatal regardless of `policy`. Under
/// `RecordPolicy::Skip`, if rows were present but none of them was usable
/// the run fails with `InvalidRecord` rather than returning an empty set.
pub fn to_records(table: &SalesTable, policy: RecordPolicy) -> Result<ParsedRecords, VatMonError> {
    let columns = locate_columns(&table.headers)?;

    let mut parsed = ParsedRecords::default();
    for (i, row) in table.rows.iter().enumerate() {
        let line = i + 2;
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
        let outcome = if table.non_utf8_lines.contains(&line) {
            Err(CellError::Parse("row is not valid UTF-8".into()))
        } else {
            parse_jurisdiction(cell(columns.jurisdiction)).and_then(|jurisdiction| {
                parse_amount(cell(columns.amount)).map(|amount| SalesRecord {
                    jurisdiction,
                    amount,
                })
            })
        };

        match outcome {
            Ok(record) => parsed.records.push(record),
            Err(e) => match policy {
                RecordPolicy::Strict => return Err(e.into_error(line)),
                RecordPolicy::Skip => {
                    tracing::debug!(line, reason = e.reason(), "skipping sales row");
                    parsed.skipped_rows.push(SkippedRow {
                        line,
                        cells: row.clone(),
                        reason: e.reason().to_string(),
                    });
                }
            },
        }
    }

    if parsed.records.is_empty() && !parsed.skipped_rows.is_empty() {
        let first = &parsed.skipped_rows[0];
        return Err(VatMonError::InvalidRecord {
            line: Some(first.line),
            reason: format!(
                "no usable sales rows ({} skipped, first: {})",
                parsed.skipped_rows.len(),
                first.reason
            ),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_CSV: &str = "\
Country,Sales_EUR,Transactions
Germany,5000,12
Germany,7500,9
France,8200,20
";

    #[test]
    fn test_read_csv_keeps_all_columns() {
        let table = read_csv(SAMPLE_CSV.as_bytes(), b',').unwrap();
        assert_eq!(table.headers, vec!["Country", "Sales_EUR", "Transactions"]);
        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_read_semicolon_delimited() {
        let data = "Country;Sales_EUR\nSpain;9500\n";
        let table = read_csv(data.as_bytes(), b';').unwrap();
        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert_eq!(parsed.records[0].amount, dec!(9500));
    }

    #[test]
    fn test_to_records() {
        let table = read_csv(SAMPLE_CSV.as_bytes(), b',').unwrap();
        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.records[2].jurisdiction, "France");
        assert_eq!(parsed.records[2].amount, dec!(8200));
        assert!(parsed.skipped_rows.is_empty());
    }

    #[test]
    fn test_malformed_row_skipped() {
        let data = "Country,Sales_EUR\nGermany,5000\nFrance,lots\nSpain,-3\nItaly,26000\n";
        let table = read_csv(data.as_bytes(), b',').unwrap();
        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped_rows.len(), 2);
        assert_eq!(parsed.skipped_rows[0].line, 3);
        assert!(parsed.skipped_rows[0].reason.contains("lots"));
        assert!(parsed.skipped_rows[1].reason.contains("negative"));
    }

    #[test]
    fn test_strict_policy_fails_on_negative() {
        let data = "Country,Sales_EUR\nGermany,5000\nSpain,-3\n";
        let table = read_csv(data.as_bytes(), b',').unwrap();
        let err = to_records(&table, RecordPolicy::Strict).unwrap_err();
        assert!(matches!(err, VatMonError::InvalidRecord { line: Some(3), .. }));
    }

    #[test]
    fn test_strict_policy_fails_on_text() {
        let data = "Country,Sales_EUR\nGermany,abc\n";
        let table = read_csv(data.as_bytes(), b',').unwrap();
        let err = to_records(&table, RecordPolicy::Strict).unwrap_err();
        assert!(matches!(err, VatMonError::ParseError(_)));
    }

    #[test]
    fn test_all_rows_bad_is_error() {
        let data = "Country,Sales_EUR\nGermany,x\nFrance,y\n";
        let table = read_csv(data.as_bytes(), b',').unwrap();
        assert!(matches!(
            to_records(&table, RecordPolicy::Skip),
            Err(VatMonError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let table = read_csv(b"Country,Sales_EUR\n", b',').unwrap();
        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let table = read_csv(b"Country,Revenue\nGermany,5\n", b',').unwrap();
        assert!(matches!(
            to_records(&table, RecordPolicy::Skip),
            Err(VatMonError::Schema { .. })
        ));
    }

    #[test]
    fn test_short_row_and_blank_lines() {
        let table = SalesTable {
            headers: vec!["Country".into(), "Sales_EUR".into()],
            rows: vec![
                vec!["Poland".into(), "4000".into()],
                vec!["".into(), "".into()],
                vec!["Belgium".into()],
            ],
            ..SalesTable::default()
        };
        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped_rows.len(), 1);
        assert_eq!(parsed.skipped_rows[0].line, 4);
    }

    #[test]
    fn test_non_utf8_row_skipped() {
        let mut data = b"Country,Sales_EUR\nGermany,12500\nFrance,8200\n".to_vec();
        data.extend_from_slice(b"\xD6sterreich,15000\n");
        data.extend_from_slice(b"Spain,9500\n");

        let table = read_csv(&data, b',').unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.non_utf8_lines, vec![4]);

        let parsed = to_records(&table, RecordPolicy::Skip).unwrap();
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.records[2].jurisdiction, "Spain");
        assert_eq!(parsed.skipped_rows.len(), 1);
        assert_eq!(parsed.skipped_rows[0].line, 4);
        assert!(parsed.skipped_rows[0].reason.contains("UTF-8"));
    }

    #[test]
    fn test_non_utf8_row_strict() {
        let data = b"Country,Sales_EUR\nGermany,12500\n\xD6sterreich,15000\n";
        let table = read_csv(data, b',').unwrap();
        match to_records(&table, RecordPolicy::Strict) {
            Err(VatMonError::ParseError(msg)) => assert!(msg.contains("line 3")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}

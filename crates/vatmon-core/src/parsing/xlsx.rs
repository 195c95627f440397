use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_decimal::Decimal;

use crate::error::VatMonError;
use crate::parsing::SalesTable;

/// Read a sales sheet from an xlsx workbook into a `SalesTable`.
///
/// Uses `sheet` if given, otherwise the first worksheet. The first non-empty
/// row is the header row. Numeric cells are converted through `Decimal` so
/// that values like 8200.1 are not rendered as 8200.099999...
pub fn read_xlsx(bytes: &[u8], sheet: Option<&str>) -> Result<SalesTable, VatMonError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| VatMonError::ParseError(format!("failed to open xlsx: {e}")))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| VatMonError::ParseError("workbook has no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| VatMonError::ParseError(format!("sheet '{sheet_name}' not found: {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_as_string).collect::<Vec<String>>())
        .skip_while(|cells| cells.iter().all(|c| c.is_empty()));

    let headers = rows.next().ok_or_else(|| {
        VatMonError::ParseError(format!("sheet '{sheet_name}' contains no header row"))
    })?;

    Ok(SalesTable {
        headers,
        rows: rows.collect(),
        ..SalesTable::default()
    })
}

fn cell_as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => match f64_to_decimal(*f) {
            Some(d) => d.normalize().to_string(),
            None => format!("{f}"),
        },
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

/// Convert f64 to Decimal via its shortest string form, so 0.0035_f64 stays
/// 0.0035 instead of 0.00349999... `None` for NaN, infinities and magnitudes
/// a `Decimal` cannot hold.
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::values::parse_amount;
    use rust_decimal_macros::dec;

    #[test]
    fn f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(8200.1), Some(dec!(8200.1)));
        assert_eq!(f64_to_decimal(12500.0), Some(dec!(12500)));
        assert_eq!(f64_to_decimal(0.0035), Some(dec!(0.0035)));
    }

    #[test]
    fn out_of_range_floats_keep_their_text() {
        assert_eq!(f64_to_decimal(1e30), None);
        assert_eq!(f64_to_decimal(f64::NAN), None);

        let huge = cell_as_string(&Data::Float(1e30));
        assert_ne!(huge, "0");
        assert!(parse_amount(&huge).is_err());
        assert!(parse_amount(&cell_as_string(&Data::Float(f64::INFINITY))).is_err());
    }

    #[test]
    fn float_cells_render_without_trailing_zeros() {
        assert_eq!(cell_as_string(&Data::Float(15000.0)), "15000");
        assert_eq!(cell_as_string(&Data::Int(300)), "300");
        assert_eq!(cell_as_string(&Data::Empty), "");
    }

    #[test]
    fn garbage_bytes_are_parse_error() {
        let err = read_xlsx(b"not a workbook", None).unwrap_err();
        assert!(matches!(err, VatMonError::ParseError(_)));
    }
}

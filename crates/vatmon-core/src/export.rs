use crate::error::VatMonError;
use crate::model::JurisdictionTotal;
use crate::parsing::header::{AMOUNT_COLUMN, JURISDICTION_COLUMN};
use std::io::Write;

/// Write aggregated totals as a two-column `Country,Sales_EUR` table.
///
/// Output is UTF-8 with a header row. Amounts are written in normalized
/// form (no trailing zeros).
pub fn write_totals<W: Write>(
    totals: &[JurisdictionTotal],
    writer: W,
    delimiter: u8,
) -> Result<(), VatMonError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record([JURISDICTION_COLUMN, AMOUNT_COLUMN])?;
    for t in totals {
        let amount = t.total.normalize().to_string();
        csv_writer.write_record([t.jurisdiction.as_str(), amount.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render totals to a string with `write_totals`.
pub fn totals_to_string(
    totals: &[JurisdictionTotal],
    delimiter: u8,
) -> Result<String, VatMonError> {
    let mut buf = Vec::new();
    write_totals(totals, &mut buf, delimiter)?;
    String::from_utf8(buf).map_err(|e| VatMonError::ParseError(e.to_string()))
}

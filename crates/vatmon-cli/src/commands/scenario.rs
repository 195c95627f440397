use rust_decimal::Decimal;
use vatmon_core::aggregate::aggregate;
use vatmon_core::error::VatMonError;
use vatmon_core::scenario::sweep;

use super::load_records;
use crate::output;
use crate::{InputArgs, OutputFormat};

pub fn run(
    input: &InputArgs,
    limits: &[Decimal],
    warning_ratio: Decimal,
    output_format: OutputFormat,
) -> Result<(), VatMonError> {
    let (records, _skipped) = load_records(input)?;
    let totals = aggregate(&records)?;
    let points = sweep(&totals, limits, warning_ratio)?;

    match output_format {
        OutputFormat::Json => output::json::print(&points)?,
        OutputFormat::Table => output::table::print_scenarios(&points),
    }

    Ok(())
}

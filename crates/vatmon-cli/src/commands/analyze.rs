use vatmon_core::error::VatMonError;
use vatmon_core::{analyze_records, analyze_table, demo};

use super::{read_table, report_skipped, resolve_threshold};
use crate::output;
use crate::{InputArgs, OutputFormat, ThresholdArgs};

pub fn run(
    input: &InputArgs,
    threshold: &ThresholdArgs,
    output_format: OutputFormat,
    show_skipped: bool,
    verbose: bool,
) -> Result<(), VatMonError> {
    let config = resolve_threshold(threshold)?;

    let analysis = match read_table(input)? {
        Some(table) => analyze_table(&table, &config, input.policy())?,
        None => analyze_records(&demo::records(), &config)?,
    };
    report_skipped(&analysis.skipped_rows);

    match output_format {
        OutputFormat::Json => output::json::print(&analysis)?,
        OutputFormat::Table => output::table::print(&analysis, show_skipped, verbose),
    }

    Ok(())
}

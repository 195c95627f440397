use std::path::PathBuf;

use vatmon_core::aggregate::aggregate;
use vatmon_core::error::VatMonError;
use vatmon_core::export::write_totals;

use super::{delimiter_byte, load_records};
use crate::InputArgs;

pub fn run(
    input: &InputArgs,
    out: Option<PathBuf>,
    out_delimiter: char,
) -> Result<(), VatMonError> {
    let (records, _skipped) = load_records(input)?;
    let totals = aggregate(&records)?;
    let delimiter = delimiter_byte(out_delimiter)?;

    match out {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            write_totals(&totals, file, delimiter)?;
            eprintln!(
                "Exported {} jurisdiction(s) to {}",
                totals.len(),
                path.display()
            );
        }
        None => {
            write_totals(&totals, std::io::stdout().lock(), delimiter)?;
        }
    }

    Ok(())
}

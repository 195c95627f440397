pub mod analyze;
pub mod export;
pub mod presets;
pub mod scenario;

use vatmon_core::error::VatMonError;
use vatmon_core::model::SalesRecord;
use vatmon_core::parsing::{self, RecordPolicy, SalesTable, SkippedRow};
use vatmon_core::thresholds::{self, builtin};
use vatmon_core::{demo, model::ThresholdConfig};

use crate::{InputArgs, ThresholdArgs};

impl InputArgs {
    pub fn policy(&self) -> RecordPolicy {
        if self.strict {
            RecordPolicy::Strict
        } else {
            RecordPolicy::Skip
        }
    }
}

/// Read the input file into a table, or `None` when demo data should be used.
pub fn read_table(input: &InputArgs) -> Result<Option<SalesTable>, VatMonError> {
    let Some(path) = &input.input_file else {
        eprintln!("No input file given. Using demo data.");
        return Ok(None);
    };

    let bytes = std::fs::read(path)?;
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
        .unwrap_or(false);

    let table = if is_xlsx {
        parsing::xlsx::read_xlsx(&bytes, input.sheet.as_deref())?
    } else {
        parsing::read_csv(&bytes, delimiter_byte(input.delimiter)?)?
    };
    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "read sales table"
    );
    Ok(Some(table))
}

/// Sales records from the input file (or the demo set) plus any skipped rows.
pub fn load_records(input: &InputArgs) -> Result<(Vec<SalesRecord>, Vec<SkippedRow>), VatMonError> {
    match read_table(input)? {
        Some(table) => {
            let parsed = parsing::to_records(&table, input.policy())?;
            report_skipped(&parsed.skipped_rows);
            Ok((parsed.records, parsed.skipped_rows))
        }
        None => Ok((demo::records(), Vec::new())),
    }
}

/// Resolve preset/config file and flag overrides into one validated config.
pub fn resolve_threshold(args: &ThresholdArgs) -> Result<ThresholdConfig, VatMonError> {
    let def = match (&args.config, &args.preset) {
        (Some(path), _) => thresholds::load_threshold_file(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET)?,
    };

    let mut config = def.config();
    if let Some(limit) = args.limit {
        config.limit = limit;
    }
    if let Some(ratio) = args.warning_ratio {
        config.warning_ratio = ratio;
    }
    config.validate()?;

    tracing::debug!(
        preset = %def.name,
        limit = %config.limit,
        warning_ratio = %config.warning_ratio,
        "resolved threshold"
    );
    Ok(config)
}

pub fn delimiter_byte(c: char) -> Result<u8, VatMonError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(VatMonError::ParseError(format!(
            "delimiter '{c}' must be a single ASCII character"
        )))
    }
}

pub fn report_skipped(skipped: &[SkippedRow]) {
    if !skipped.is_empty() {
        tracing::warn!(count = skipped.len(), "rows skipped during ingestion");
    }
}

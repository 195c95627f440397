pub mod aggregate;
pub mod classify;
pub mod demo;
pub mod error;
pub mod export;
pub mod model;
pub mod parsing;
pub mod scenario;
pub mod thresholds;

use aggregate::{aggregate, similar_jurisdictions};
use classify::Classification;
use error::VatMonError;
use model::{JurisdictionTotal, SalesRecord, ThresholdConfig};
use parsing::{RecordPolicy, SalesTable, SkippedRow};
use serde::{Deserialize, Serialize};

/// How tabular input is read before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub policy: RecordPolicy,
    /// Field delimiter for CSV input.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        IngestOptions {
            policy: RecordPolicy::Skip,
            delimiter: b',',
        }
    }
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub classification: Classification,
    /// Aggregated totals, sorted by jurisdiction.
    pub totals: Vec<JurisdictionTotal>,
    /// Input rows dropped during ingestion.
    pub skipped_rows: Vec<SkippedRow>,
    /// Jurisdiction names that differ only by case or whitespace.
    pub similar_jurisdictions: Vec<Vec<String>>,
}

/// Aggregate records and classify the totals.
pub fn analyze_records(
    records: &[SalesRecord],
    config: &ThresholdConfig,
) -> Result<Analysis, VatMonError> {
    config.validate()?;
    let totals = aggregate(records)?;
    let classification = classify::classify(&totals, config)?;
    let similar = similar_jurisdictions(&totals);
    Ok(Analysis {
        classification,
        totals,
        skipped_rows: Vec::new(),
        similar_jurisdictions: similar,
    })
}

/// Main API entry point: validate a sales table and analyze it.
///
/// Fails without partial output if the table lacks the required columns or
/// the threshold is invalid.
pub fn analyze_table(
    table: &SalesTable,
    config: &ThresholdConfig,
    policy: RecordPolicy,
) -> Result<Analysis, VatMonError> {
    config.validate()?;
    let parsed = parsing::to_records(table, policy)?;
    let mut analysis = analyze_records(&parsed.records, config)?;
    analysis.skipped_rows = parsed.skipped_rows;
    Ok(analysis)
}

/// Analyze CSV bytes.
pub fn analyze_csv(
    bytes: &[u8],
    config: &ThresholdConfig,
    options: &IngestOptions,
) -> Result<Analysis, VatMonError> {
    let table = parsing::read_csv(bytes, options.delimiter)?;
    analyze_table(&table, config, options.policy)
}

/// Analyze the first (or named) sheet of an xlsx workbook.
pub fn analyze_xlsx(
    bytes: &[u8],
    sheet: Option<&str>,
    config: &ThresholdConfig,
    options: &IngestOptions,
) -> Result<Analysis, VatMonError> {
    let table = parsing::xlsx::read_xlsx(bytes, sheet)?;
    analyze_table(&table, config, options.policy)
}

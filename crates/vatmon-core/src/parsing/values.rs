use crate::error::VatMonError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Why a cell could not become part of a `SalesRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// Not interpretable as the expected type.
    Parse(String),
    /// Well-formed but semantically invalid (e.g. a negative amount).
    Invalid(String),
}

impl CellError {
    pub fn reason(&self) -> &str {
        match self {
            CellError::Parse(r) | CellError::Invalid(r) => r,
        }
    }

    pub fn into_error(self, line: usize) -> VatMonError {
        match self {
            CellError::Parse(reason) => {
                VatMonError::ParseError(format!("line {line}: {reason}"))
            }
            CellError::Invalid(reason) => VatMonError::InvalidRecord {
                line: Some(line),
                reason,
            },
        }
    }
}

/// Parse a sales amount cell.
///
/// Handles formats like:
/// - "12500" -> 12500
/// - "8200.50" -> 8200.50
/// - "€ 9500" / "9500 EUR" -> 9500
/// - "1_000" -> 1000
///
/// Empty cells and text are parse errors; negative amounts are invalid.
pub fn parse_amount(s: &str) -> Result<Decimal, CellError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CellError::Parse("amount is empty".into()));
    }

    let stripped = strip_currency(trimmed);
    let normalized: String = stripped.chars().filter(|c| *c != '_').collect();

    let value = Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| CellError::Parse(format!("amount '{trimmed}' is not a number")))?;

    if value < Decimal::ZERO {
        return Err(CellError::Invalid(format!(
            "amount '{trimmed}' is negative"
        )));
    }
    Ok(value)
}

/// Parse a jurisdiction cell. Surrounding whitespace is kept so that grouping
/// stays an exact match on what the source contained.
pub fn parse_jurisdiction(s: &str) -> Result<String, CellError> {
    if s.trim().is_empty() {
        return Err(CellError::Invalid("jurisdiction is empty".into()));
    }
    Ok(s.to_string())
}

fn strip_currency(s: &str) -> &str {
    let s = s
        .strip_prefix('€')
        .or_else(|| s.strip_prefix("EUR"))
        .unwrap_or(s);
    let s = s
        .strip_suffix('€')
        .or_else(|| s.strip_suffix("EUR"))
        .unwrap_or(s);
    s.trim()
}

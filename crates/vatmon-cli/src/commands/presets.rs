use std::path::Path;

use vatmon_core::error::VatMonError;
use vatmon_core::thresholds::{self, builtin};

pub fn list() -> Result<(), VatMonError> {
    println!("Available predefined thresholds:\n");
    for name in builtin::PRESETS {
        let def = builtin::load_preset(name)?;
        let currency = def.currency.as_deref().unwrap_or("");
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<10} {} [{} {}]{}",
            name,
            def.name,
            def.limit.normalize(),
            currency,
            default_marker
        );
        if let Some(ref desc) = def.description {
            println!("             {}", desc);
        }
        if let Some(note) = currency_note(def.currency.as_deref()) {
            println!("             {}", note);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), VatMonError> {
    let def = builtin::load_preset(preset)?;
    let config = def.config();
    let currency = def.currency.as_deref().unwrap_or("");

    println!("{}\n", def.name);
    if let Some(ref desc) = def.description {
        println!("{}\n", desc);
    }

    println!("Each country's summed sales are compared against a single limit:\n");
    println!(
        "  Breached     total >= {} {}",
        config.limit.normalize(),
        currency
    );
    println!(
        "  Approaching  {} <= total < {} ({}% of the limit)",
        config.warning_floor().normalize(),
        config.limit.normalize(),
        (config.warning_ratio * rust_decimal::Decimal::ONE_HUNDRED).normalize()
    );
    println!(
        "  Safe         total < {}",
        config.warning_floor().normalize()
    );
    println!();
    println!("Both bands include their lower edge: a total exactly at the limit");
    println!("is breached, a total exactly at the warning level is approaching.\n");

    if let Some(note) = currency_note(def.currency.as_deref()) {
        println!("{}\n", note);
    }

    Ok(())
}

/// Input amounts are read from the Sales_EUR column and never converted, so
/// a limit in any other currency is compared against EUR figures as-is.
fn currency_note(currency: Option<&str>) -> Option<String> {
    let currency = currency?.trim();
    if currency.is_empty() || currency.eq_ignore_ascii_case("EUR") {
        return None;
    }
    Some(format!(
        "Note: this limit is in {currency}, but it is compared against the \
         Sales_EUR column as-is. No currency conversion is performed."
    ))
}

pub fn schema() -> Result<(), VatMonError> {
    print!(
        r#"JSON Threshold Schema
=====================

A threshold file defines the registration limit that `vatmon analyze`
compares each country's summed sales against.

Fields:
  name           (string, required)  Human-readable name of the threshold
  description    (string, optional)  What the threshold represents
  currency       (string, optional)  Currency label for display. No
                                     conversion is performed.
  limit          (string, required)  Sales at or above this value require
                                     registration. Decimal string, >= 0.
  warning_ratio  (string, optional)  Fraction of the limit from which a
                                     country is flagged as approaching.
                                     Must be > 0 and <= 1. Default: "0.8"

Example:
{{
  "name": "Marketplace policy",
  "description": "Internal early-warning limit for EU distance sales",
  "currency": "EUR",
  "limit": "10000",
  "warning_ratio": "0.75"
}}

Note: decimal values must be quoted strings, not bare numbers,
to preserve exact precision (e.g., "0.75" not 0.75).
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), VatMonError> {
    let def = thresholds::load_threshold_file(file)?;
    let config = def.config();

    println!("Threshold '{}' is valid.", def.name);
    println!("  Limit: {}", config.limit.normalize());
    println!("  Warning level: {}", config.warning_floor().normalize());
    if let Some(note) = currency_note(def.currency.as_deref()) {
        println!("  {}", note);
    }

    if config.limit.is_zero() {
        println!("\nWarnings:");
        println!("  - limit is 0, every country with sales will be flagged as breached");
    }

    Ok(())
}

use rust_decimal::Decimal;
use vatmon_core::model::{ComplianceStatus, ThresholdConfig};
use vatmon_core::scenario::ScenarioPoint;
use vatmon_core::Analysis;

pub fn print(analysis: &Analysis, show_skipped: bool, verbose: bool) {
    let c = &analysis.classification;
    let summary = &c.summary;

    println!("=== Executive Summary ===\n");
    println!("  Total revenue:          {}", format_amount(summary.total_revenue));
    println!("  Markets over threshold: {}", summary.breached_count);
    println!("  Approaching threshold:  {}", summary.approaching_count);
    println!("  Safe:                   {}", summary.safe_count);
    println!(
        "  Threshold limit:        {} (warning at {})",
        format_amount(c.threshold.limit),
        format_amount(c.threshold.warning_floor())
    );
    println!();

    println!("=== VAT Registration Status ===\n");
    if c.jurisdictions.is_empty() {
        println!("  No sales records.\n");
    } else {
        let rows = c.by_severity();
        let max_name = rows
            .iter()
            .map(|r| r.jurisdiction.chars().count())
            .max()
            .unwrap_or(10);

        for r in &rows {
            println!(
                "  {} {:<width$}  {:>14}  {:>7}  {}",
                marker(r.status),
                r.jurisdiction,
                format_amount(r.total),
                percent_of_limit(r.total, &c.threshold),
                r.status.label(),
                width = max_name
            );
            if verbose {
                println!("      {}", r.reason);
            }
        }
        println!();
    }

    if !analysis.similar_jurisdictions.is_empty() {
        println!("  Warning: these names differ only by case or spacing and were kept apart:");
        for group in &analysis.similar_jurisdictions {
            println!("    {}", group.join(" / "));
        }
        println!();
    }

    if !analysis.skipped_rows.is_empty() {
        println!(
            "  {} row(s) skipped during ingestion",
            analysis.skipped_rows.len()
        );
        if show_skipped {
            for row in &analysis.skipped_rows {
                println!("    line {}: {} [{}]", row.line, row.reason, row.cells.join(", "));
            }
        }
        println!();
    }
}

pub fn print_scenarios(points: &[ScenarioPoint]) {
    println!("=== What-if Threshold Scenarios ===\n");
    println!(
        "  {:>14}  {:>14}  {:>8}  {:>11}  {:>4}  Breached markets",
        "Limit", "Warning at", "Breached", "Approaching", "Safe"
    );
    println!("  {}", "-".repeat(78));

    for p in points {
        println!(
            "  {:>14}  {:>14}  {:>8}  {:>11}  {:>4}  {}",
            format_amount(p.threshold.limit),
            format_amount(p.threshold.warning_floor()),
            p.summary.breached_count,
            p.summary.approaching_count,
            p.summary.safe_count,
            if p.breached.is_empty() {
                "-".to_string()
            } else {
                p.breached.join(", ")
            }
        );
    }
    println!();
}

fn marker(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Breached => "[!!]",
        ComplianceStatus::Approaching => "[! ]",
        ComplianceStatus::Safe => "[ok]",
    }
}

/// Share of the limit used, or "n/a" when the limit is zero or the share is
/// too large to represent.
fn percent_of_limit(total: Decimal, threshold: &ThresholdConfig) -> String {
    match total
        .checked_div(threshold.limit)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(pct) => format!("{:.1}%", pct.round_dp(1)),
        None => "n/a".to_string(),
    }
}

/// Two decimals with thousands separators, e.g. 12500 -> "12,500.00".
fn format_amount(value: Decimal) -> String {
    let s = format!("{:.2}", value.round_dp(2));
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

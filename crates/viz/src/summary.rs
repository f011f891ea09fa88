//! Plain-text summary block printed after rendering.

use decomchart_pipeline::{FuelCategory, RetirementOutlook, FIRST_RETIREMENT_YEAR};
use std::fmt::Write as _;

/// Render the four summary lines: country count, year span, and the total
/// cumulative GW per fuel category.
#[must_use]
pub fn summary(outlook: &RetirementOutlook) -> String {
    let first = outlook
        .years
        .first()
        .copied()
        .unwrap_or(FIRST_RETIREMENT_YEAR);
    let last = outlook
        .years
        .last()
        .copied()
        .unwrap_or(FIRST_RETIREMENT_YEAR);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total countries with planned retirements: {}",
        outlook.countries.len()
    );
    let _ = writeln!(out, "Year range: {first} to {last}");
    let _ = writeln!(
        out,
        "Total planned coal capacity retirement: {} GW",
        format_gw(outlook.total_gw(FuelCategory::Coal))
    );
    let _ = writeln!(
        out,
        "Total planned gas capacity retirement: {} GW",
        format_gw(outlook.total_gw(FuelCategory::Gas))
    );
    out
}

/// Format a GW value with thousands separators and one decimal place.
#[must_use]
pub fn format_gw(value: f64) -> String {
    let formatted = format!("{value:.1}");
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "0"));
    format!("{}.{}", format_with_thousands(int_part), frac_part)
}

fn format_with_thousands(input: &str) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let negative = chars.first() == Some(&'-');
    if negative {
        chars.remove(0);
    }

    let mut out = String::new();
    for (idx, ch) in chars.iter().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }

    let mut out: String = out.chars().rev().collect();
    if negative {
        out.insert(0, '-');
    }
    out
}

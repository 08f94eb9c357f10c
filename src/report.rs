//! Presentation helpers: en-IN currency formatting, text summary, CSV and JSON export
//!
//! All amounts are assumed to be in crores of rupees. Rounding happens here and
//! nowhere in the engine.

use crate::inputs::ValuationInput;
use crate::valuation::ValuationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::Write as _;
use std::io::Write;

const RUPEE: &str = "₹";

/// Fixed-point text with exact ties rounded away from zero
///
/// `format!` rounds exact ties to even (0.125 -> "0.12"); currency display
/// expects "0.13". Only values whose exact binary expansion is a tie are moved.
fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let magnitude = value.abs();
    // every finite f64 has at most 1074 fractional digits
    let exact = format!("{:.1100}", magnitude);
    let is_tie = exact
        .split_once('.')
        .map(|(_, frac)| {
            frac.as_bytes().get(decimals) == Some(&b'5')
                && frac.as_bytes()[decimals + 1..].iter().all(|&b| b == b'0')
        })
        .unwrap_or(false);

    let rounded = if is_tie { f64::from_bits(magnitude.to_bits() + 1) } else { magnitude };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{:.*}", sign, decimals, rounded)
}

/// Group an integer digit string the Indian way: 12,34,56,789
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

/// Format an amount as rupees with Indian digit grouping and two decimals
///
/// `1234567.891` -> `₹12,34,567.89`, `-5000` -> `-₹5,000.00`
pub fn format_inr(value: f64) -> String {
    if value.is_nan() {
        return format!("{}NaN", RUPEE);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{}{}∞", sign, RUPEE);
    }

    let fixed = to_fixed(value.abs(), 2);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}{}{}.{}", sign, RUPEE, group_indian(int_part), frac_part)
}

/// Rupee amount suffixed with the crore unit
pub fn format_crores(value: f64) -> String {
    format!("{} Cr", format_inr(value))
}

/// Compact chart-axis label: thousands collapse to `k`
pub fn format_axis(value: f64) -> String {
    if value >= 1000.0 {
        format!("{}{}k", RUPEE, to_fixed(value / 1000.0, 1))
    } else {
        format!("{}{}", RUPEE, to_fixed(value, 0))
    }
}

#[derive(Serialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "ProjectedFCF")]
    projected_fcf: f64,
    #[serde(rename = "PresentValue")]
    present_value: f64,
}

/// Write the per-year series as CSV (`Year,ProjectedFCF,PresentValue`)
pub fn write_cashflows_csv<W: Write>(writer: W, result: &ValuationResult) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in &result.projected_cash_flows {
        csv_writer.serialize(CsvRow {
            year: row.year,
            projected_fcf: row.projected_fcf,
            present_value: row.present_value,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Multi-line text report for terminal output
pub fn render_summary(input: &ValuationInput, result: &ValuationResult) -> String {
    let company_name = input.company_name.as_str();
    let mut out = String::new();
    let name = if company_name.is_empty() { "(unnamed)" } else { company_name };

    let _ = writeln!(out, "Valuation for {}", name);
    let _ = writeln!(out, "All values are in Crores ({})", RUPEE);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Intrinsic Value Per Share: {}", format_inr(result.intrinsic_value_per_share));
    let _ = writeln!(out, "  Total Equity Value:        {}", format_inr(result.equity_value));
    let _ = writeln!(out, "  Enterprise Value:          {}", format_inr(result.enterprise_value));
    let _ = writeln!(out, "  PV of Terminal Value:      {}", format_inr(result.pv_terminal_value));
    let _ = writeln!(out, "  Net Debt:                  {}", format_inr(input.net_debt()));
    let _ = writeln!(out);

    if !result.projected_cash_flows.is_empty() {
        let _ = writeln!(out, "{:>6} {:>20} {:>20}", "Year", "Projected FCF", "Present Value");
        let _ = writeln!(out, "{}", "-".repeat(48));
        for row in &result.projected_cash_flows {
            let _ = writeln!(
                out,
                "{:>6} {:>20} {:>20}",
                row.year,
                format_inr(row.projected_fcf),
                format_inr(row.present_value),
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Sum of PV of FCFs: {}", format_crores(result.sum_pv_cash_flows));
    out
}

/// JSON envelope for a single valuation
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
    pub company_name: String,
    pub generated_at: DateTime<Utc>,
    pub input: ValuationInput,
    pub result: ValuationResult,
}

impl ValuationReport {
    pub fn new(input: &ValuationInput, result: &ValuationResult) -> Self {
        Self {
            company_name: input.company_name.clone(),
            generated_at: Utc::now(),
            input: input.clone(),
            result: result.clone(),
        }
    }
}

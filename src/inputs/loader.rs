//! Load valuation inputs from CSV or JSON
//!
//! Numeric cells are parsed leniently: an empty or unparseable entry counts as
//! zero, the same way the input form treats a blank field.

use super::ValuationInput;
use csv::Reader;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row, one company per line
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "CompanyName", default)]
    company_name: String,
    #[serde(rename = "CurrentFCF", default)]
    current_fcf: String,
    #[serde(rename = "GrowthRate", default)]
    growth_rate: String,
    #[serde(rename = "ProjectionYears", default)]
    projection_years: String,
    #[serde(rename = "WACC", default)]
    wacc: String,
    #[serde(rename = "TerminalGrowthRate", default)]
    terminal_growth_rate: String,
    #[serde(rename = "Debt", default)]
    debt: String,
    #[serde(rename = "Cash", default)]
    cash: String,
    #[serde(rename = "SharesOutstanding", default)]
    shares_outstanding: String,
}

impl CsvRow {
    fn to_input(self) -> ValuationInput {
        ValuationInput {
            company_name: self.company_name.trim().to_string(),
            current_fcf: parse_amount(&self.current_fcf),
            growth_rate: parse_amount(&self.growth_rate),
            projection_years: parse_years(&self.projection_years),
            wacc: parse_amount(&self.wacc),
            terminal_growth_rate: parse_amount(&self.terminal_growth_rate),
            debt: parse_amount(&self.debt),
            cash: parse_amount(&self.cash),
            shares_outstanding: parse_amount(&self.shares_outstanding),
        }
    }
}

/// Parse a numeric field, treating empty or malformed text as zero
///
/// Non-finite spellings such as `NaN` or `inf` also count as malformed.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        Ok(_) | Err(_) => {
            log::debug!("Unparseable amount {:?}, using 0", raw);
            0.0
        }
    }
}

/// Parse a projection window length
///
/// Fractional entries are truncated; negative or non-finite entries give zero years.
pub fn parse_years(raw: &str) -> u32 {
    let value = parse_amount(raw);
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.trunc().min(u32::MAX as f64) as u32
}

/// Load all valuation inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<ValuationInput>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load valuation inputs from any reader (e.g., string buffer, stdin)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ValuationInput>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        inputs.push(row.to_input());
    }

    log::info!("Loaded {} valuation inputs", inputs.len());
    Ok(inputs)
}

/// Load a single valuation input from a JSON file
pub fn load_input_json<P: AsRef<Path>>(path: P) -> Result<ValuationInput, Box<dyn Error>> {
    let file = File::open(path)?;
    let input = serde_json::from_reader(BufReader::new(file))?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "CompanyName,CurrentFCF,GrowthRate,ProjectionYears,WACC,TerminalGrowthRate,Debt,Cash,SharesOutstanding\n";

    #[test]
    fn test_parse_amount_lenient() {
        assert_eq!(parse_amount("1250.5"), 1250.5);
        assert_eq!(parse_amount("  -3 "), -3.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    #[test]
    fn test_parse_amount_non_finite_is_zero() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "Infinity"] {
            assert_eq!(parse_amount(raw), 0.0, "{:?} should parse as zero", raw);
        }
        assert_eq!(parse_years("NaN"), 0);
    }

    #[test]
    fn test_nan_shares_row_is_rejected() {
        use crate::valuation::{compute, ValidationError};

        let data = format!("{}NaN Shares,1000,15,5,12,5,5000,2000,NaN\n", HEADER);
        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs[0].shares_outstanding, 0.0);
        assert_eq!(
            compute(&inputs[0]),
            Err(ValidationError::InvalidShares { shares_outstanding: 0.0 })
        );
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("7"), 7);
        assert_eq!(parse_years("4.9"), 4);
        assert_eq!(parse_years("-2"), 0);
        assert_eq!(parse_years(""), 0);
    }

    #[test]
    fn test_load_inputs_from_reader() {
        let data = format!(
            "{}Example Ltd.,1000,15,5,12,5,5000,2000,100\nBlank Co,,,,,,,,\n",
            HEADER
        );
        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], ValuationInput::example());

        let blank = &inputs[1];
        assert_eq!(blank.company_name, "Blank Co");
        assert_eq!(blank.current_fcf, 0.0);
        assert_eq!(blank.projection_years, 0);
        assert_eq!(blank.shares_outstanding, 0.0);
    }

    #[test]
    fn test_load_inputs_malformed_row_errors() {
        let data = format!("{}Short Row,1000,15\n", HEADER);
        assert!(load_inputs_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_input_json_missing_file() {
        assert!(load_input_json("does/not/exist.json").is_err());
    }
}

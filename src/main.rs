//! DCF Valuation CLI
//!
//! Values one company. Starts from the example company (or a JSON input file),
//! applies any field flags, then submits once.
//!
//! ```bash
//! dcf_valuation --current-fcf 1200 --wacc 11
//! dcf_valuation --input acme.json --json
//! dcf_valuation --csv cashflows.csv
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use dcf_valuation::inputs::load_input_json;
use dcf_valuation::report::{render_summary, write_cashflows_csv, ValuationReport};
use dcf_valuation::{SessionState, ValuationInput, ValuationSession};
use std::fs::File;
use std::path::PathBuf;

/// Discounted cash flow valuation (amounts in crores, rates in percent)
#[derive(Parser, Debug)]
#[command(name = "dcf_valuation")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding a full input record (camelCase fields)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Start from a cleared form instead of the example company
    #[arg(long, conflicts_with = "input")]
    blank: bool,

    #[arg(long)]
    company_name: Option<String>,

    /// Current year free cash flow
    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    current_fcf: Option<f64>,

    /// FCF growth rate during the projection window (%)
    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    growth_rate: Option<f64>,

    /// Number of forecast years
    #[arg(long)]
    projection_years: Option<u32>,

    /// Weighted average cost of capital (%)
    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    wacc: Option<f64>,

    /// Perpetual growth rate after the projection window (%)
    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    terminal_growth_rate: Option<f64>,

    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    debt: Option<f64>,

    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    cash: Option<f64>,

    #[arg(long, allow_hyphen_values = true, value_parser = finite_amount)]
    shares_outstanding: Option<f64>,

    /// Print a JSON report instead of the text summary
    #[arg(long)]
    json: bool,

    /// Also write the per-year cash flows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Reject NaN and infinite flag values; the engine expects real numbers
fn finite_amount(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{:?} is not a number", raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{:?} is not a finite number", raw))
    }
}

impl Cli {
    fn base_input(&self) -> Result<ValuationInput> {
        if let Some(path) = &self.input {
            return load_input_json(path)
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("Failed to read input from {}", path.display()));
        }
        Ok(if self.blank { ValuationInput::blank() } else { ValuationInput::example() })
    }

    fn apply_overrides(&self, input: &mut ValuationInput) {
        if let Some(name) = &self.company_name {
            input.company_name = name.clone();
        }
        if let Some(v) = self.current_fcf { input.current_fcf = v; }
        if let Some(v) = self.growth_rate { input.growth_rate = v; }
        if let Some(v) = self.projection_years { input.projection_years = v; }
        if let Some(v) = self.wacc { input.wacc = v; }
        if let Some(v) = self.terminal_growth_rate { input.terminal_growth_rate = v; }
        if let Some(v) = self.debt { input.debt = v; }
        if let Some(v) = self.cash { input.cash = v; }
        if let Some(v) = self.shares_outstanding { input.shares_outstanding = v; }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut session = ValuationSession::new(cli.base_input()?);
    session.edit(|input| cli.apply_overrides(input));

    let result = match session.submit() {
        SessionState::Computed(result) => result.clone(),
        SessionState::Invalid(err) => {
            log::debug!("Validation failed: {}", err);
            bail!("{}", err.user_message());
        }
        SessionState::Editing => bail!("valuation was not submitted"),
    };
    let input = session.input();

    if cli.json {
        let report = ValuationReport::new(input, &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_summary(input, &result));
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        write_cashflows_csv(file, &result).map_err(|e| anyhow!("{}", e))?;
        if !cli.json {
            println!("\nCash flows written to: {}", path.display());
        }
    }

    Ok(())
}

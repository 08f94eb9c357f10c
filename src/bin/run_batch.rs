//! Value every company listed in a CSV file
//!
//! Reads config from environment variables:
//!   BATCH_INPUT   input CSV (default: valuation_inputs.csv)
//!   BATCH_OUTPUT  output CSV (default: valuation_batch_output.csv)
//! Pass --json to print all outcomes as JSON instead of writing the CSV.

use anyhow::{anyhow, Context, Result};
use dcf_valuation::inputs::load_inputs;
use dcf_valuation::report::format_inr;
use dcf_valuation::{BatchOutcome, BatchResult, ValuationRunner};
use std::env;
use std::fs::File;
use std::time::Instant;

const DEFAULT_INPUT: &str = "valuation_inputs.csv";
const DEFAULT_OUTPUT: &str = "valuation_batch_output.csv";

fn write_outcomes(path: &str, outcomes: &[BatchOutcome]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "CompanyName",
        "Status",
        "SumPvCashFlows",
        "PvTerminalValue",
        "EnterpriseValue",
        "EquityValue",
        "IntrinsicValuePerShare",
        "Error",
    ])?;

    for outcome in outcomes {
        match &outcome.outcome {
            BatchResult::Valued(r) => writer.write_record([
                outcome.company_name.clone(),
                "ok".to_string(),
                format!("{:.6}", r.sum_pv_cash_flows),
                format!("{:.6}", r.pv_terminal_value),
                format!("{:.6}", r.enterprise_value),
                format!("{:.6}", r.equity_value),
                format!("{:.6}", r.intrinsic_value_per_share),
                String::new(),
            ])?,
            BatchResult::Rejected(err) => writer.write_record([
                outcome.company_name.clone(),
                "rejected".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                err.user_message().to_string(),
            ])?,
        }
    }

    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let input_path = env::var("BATCH_INPUT").unwrap_or_else(|_| DEFAULT_INPUT.to_string());
    let output_path = env::var("BATCH_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT.to_string());

    let start = Instant::now();
    let inputs = load_inputs(&input_path)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to load inputs from {}", input_path))?;
    log::info!("Loaded {} companies in {:?}", inputs.len(), start.elapsed());

    let runner = ValuationRunner::new();
    let outcomes = runner.run_batch(&inputs);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    write_outcomes(&output_path, &outcomes)?;

    println!("{:<30} {:>22}", "Company", "Value / Share");
    println!("{}", "-".repeat(53));
    for outcome in &outcomes {
        let value = match &outcome.outcome {
            BatchResult::Valued(r) => format_inr(r.intrinsic_value_per_share),
            BatchResult::Rejected(err) => err.user_message().to_string(),
        };
        println!("{:<30} {:>22}", outcome.company_name, value);
    }

    println!("\nOutput written to {}", output_path);
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}

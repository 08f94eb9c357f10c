//! Core valuation engine: explicit projection window plus Gordon-growth terminal value

use crate::inputs::ValuationInput;
use super::cashflows::{ProjectedCashFlow, ValuationResult};
use super::error::ValidationError;

/// Stateless DCF engine
///
/// Holds no data between calls, so one instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Value a single company
    pub fn value(&self, input: &ValuationInput) -> Result<ValuationResult, ValidationError> {
        compute(input)
    }
}

/// Check the two preconditions, in order. First failure wins.
fn validate(input: &ValuationInput) -> Result<(), ValidationError> {
    if input.wacc <= input.terminal_growth_rate {
        return Err(ValidationError::InvalidRate {
            wacc: input.wacc,
            terminal_growth_rate: input.terminal_growth_rate,
        });
    }

    if input.shares_outstanding <= 0.0 {
        return Err(ValidationError::InvalidShares {
            shares_outstanding: input.shares_outstanding,
        });
    }

    Ok(())
}

/// Run a DCF valuation
///
/// Rates on `input` are percents. Non-finite intermediate values are passed
/// through unchanged; only the two validation checks produce errors.
pub fn compute(input: &ValuationInput) -> Result<ValuationResult, ValidationError> {
    if let Err(err) = validate(input) {
        log::warn!("Rejected valuation for {:?}: {}", input.company_name, err);
        return Err(err);
    }

    let rates = input.rates();
    let years = input.projection_years;

    let mut projected_cash_flows = Vec::with_capacity(years as usize);
    let mut sum_pv_cash_flows = 0.0;

    for year in 1..=years {
        let t = f64::from(year);
        let projected_fcf = input.current_fcf * (1.0 + rates.growth).powf(t);
        let present_value = projected_fcf / (1.0 + rates.wacc).powf(t);
        sum_pv_cash_flows += present_value;

        log::debug!("Year {}: FCF={:.4} PV={:.4}", year, projected_fcf, present_value);
        projected_cash_flows.push(ProjectedCashFlow { year, projected_fcf, present_value });
    }

    let n = f64::from(years);
    let last_fcf = input.current_fcf * (1.0 + rates.growth).powf(n);
    let terminal_value = last_fcf * (1.0 + rates.terminal_growth) / (rates.wacc - rates.terminal_growth);
    let pv_terminal_value = terminal_value / (1.0 + rates.wacc).powf(n);

    let enterprise_value = sum_pv_cash_flows + pv_terminal_value;
    let equity_value = enterprise_value - input.debt + input.cash;
    let intrinsic_value_per_share = equity_value / input.shares_outstanding;

    let result = ValuationResult {
        projected_cash_flows,
        sum_pv_cash_flows,
        terminal_value,
        pv_terminal_value,
        enterprise_value,
        equity_value,
        intrinsic_value_per_share,
    };

    if !result.is_finite() {
        log::warn!("Valuation for {:?} produced non-finite values", input.company_name);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn with_rates(wacc: f64, terminal_growth_rate: f64) -> ValuationInput {
        ValuationInput { wacc, terminal_growth_rate, ..ValuationInput::example() }
    }

    #[test]
    fn test_example_company() {
        let result = compute(&ValuationInput::example()).unwrap();
        assert_eq!(result.projected_cash_flows.len(), 5);

        let y1 = result.projected_cash_flows[0];
        assert_eq!(y1.year, 1);
        assert_relative_eq!(y1.projected_fcf, 1150.0, epsilon = 1e-9);
        assert_relative_eq!(y1.present_value, 1150.0 / 1.12, epsilon = 1e-9);

        let y5 = result.projected_cash_flows[4];
        assert_relative_eq!(y5.projected_fcf, 2011.3571875, epsilon = 1e-6);
        assert_relative_eq!(y5.present_value, 1141.2980846, epsilon = 1e-6);

        assert_relative_eq!(result.sum_pv_cash_flows, 5416.4265775, epsilon = 1e-6);
        assert_relative_eq!(result.terminal_value, 30170.3578125, epsilon = 1e-6);
        assert_relative_eq!(result.pv_terminal_value, 17119.4712695, epsilon = 1e-6);
        assert_relative_eq!(result.enterprise_value, 22535.8978469, epsilon = 1e-6);
        assert_relative_eq!(result.equity_value, 19535.8978469, epsilon = 1e-6);
        assert_relative_eq!(result.intrinsic_value_per_share, 195.3589785, epsilon = 1e-6);
    }

    #[test]
    fn test_composition_identities() {
        let input = ValuationInput {
            current_fcf: 742.3,
            growth_rate: 8.5,
            projection_years: 10,
            debt: 1234.5,
            cash: 987.6,
            shares_outstanding: 37.0,
            ..ValuationInput::example()
        };
        let result = compute(&input).unwrap();

        let years: Vec<u32> = result.projected_cash_flows.iter().map(|r| r.year).collect();
        assert_eq!(years, (1..=10).collect::<Vec<_>>());

        let pv_sum: f64 = result.projected_cash_flows.iter().map(|r| r.present_value).sum();
        assert_relative_eq!(result.sum_pv_cash_flows, pv_sum, max_relative = 1e-12);

        assert_eq!(result.enterprise_value, result.sum_pv_cash_flows + result.pv_terminal_value);
        assert_eq!(result.equity_value, result.enterprise_value - input.debt + input.cash);
        assert_eq!(result.intrinsic_value_per_share, result.equity_value / input.shares_outstanding);
    }

    #[test]
    fn test_rate_validation() {
        assert!(matches!(compute(&with_rates(10.0, 10.0)), Err(ValidationError::InvalidRate { .. })));
        assert!(matches!(compute(&with_rates(10.0, 12.0)), Err(ValidationError::InvalidRate { .. })));
        assert!(compute(&with_rates(12.0, 10.0)).is_ok());
    }

    #[test]
    fn test_shares_validation() {
        for shares in [0.0, -5.0] {
            let input = ValuationInput { shares_outstanding: shares, ..ValuationInput::example() };
            assert_eq!(
                compute(&input),
                Err(ValidationError::InvalidShares { shares_outstanding: shares })
            );
        }
    }

    #[test]
    fn test_rate_error_checked_first() {
        let input = ValuationInput {
            wacc: 5.0,
            terminal_growth_rate: 6.0,
            shares_outstanding: 0.0,
            ..ValuationInput::example()
        };
        assert!(matches!(compute(&input), Err(ValidationError::InvalidRate { .. })));
    }

    #[test]
    fn test_zero_year_window() {
        let input = ValuationInput { projection_years: 0, ..ValuationInput::example() };
        let result = compute(&input).unwrap();

        assert!(result.projected_cash_flows.is_empty());
        assert_eq!(result.sum_pv_cash_flows, 0.0);
        assert_relative_eq!(result.terminal_value, 1000.0 * 1.05 / (0.12 - 0.05), epsilon = 1e-9);
        assert_eq!(result.pv_terminal_value, result.terminal_value);
        assert_eq!(result.summary().final_fcf, None);
    }

    #[test]
    fn test_permissive_inputs_accepted() {
        let input = ValuationInput {
            current_fcf: -400.0,
            growth_rate: -20.0,
            debt: -100.0,
            cash: -50.0,
            ..ValuationInput::example()
        };
        let result = compute(&input).unwrap();
        assert!(result.enterprise_value < 0.0);
        assert!(result.is_finite());
    }

    #[test]
    fn test_monotonic_in_current_fcf() {
        let low = compute(&ValuationInput { current_fcf: 900.0, ..ValuationInput::example() }).unwrap();
        let high = compute(&ValuationInput { current_fcf: 901.0, ..ValuationInput::example() }).unwrap();
        assert!(high.enterprise_value > low.enterprise_value);
    }

    #[test]
    fn test_non_finite_passes_through() {
        let input = ValuationInput { current_fcf: f64::INFINITY, ..ValuationInput::example() };
        let result = compute(&input).unwrap();
        assert!(result.enterprise_value.is_infinite());
        assert!(!result.is_finite());
    }

    #[test]
    fn test_idempotent() {
        let engine = ValuationEngine::new();
        let input = ValuationInput::example();
        let a = engine.value(&input).unwrap();
        let b = engine.value(&input).unwrap();
        assert_eq!(a.enterprise_value.to_bits(), b.enterprise_value.to_bits());
        assert_eq!(a.intrinsic_value_per_share.to_bits(), b.intrinsic_value_per_share.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_terminal_value_share() {
        let summary = compute(&ValuationInput::example()).unwrap().summary();
        assert_eq!(summary.projection_years, 5);
        assert_relative_eq!(summary.terminal_value_share, 17119.4712695 / 22535.8978469, epsilon = 1e-9);
    }
}

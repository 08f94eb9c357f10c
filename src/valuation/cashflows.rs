//! Valuation output structures
//!
//! Non-finite amounts serialize as the strings `"NaN"`, `"Infinity"` and
//! `"-Infinity"` so degenerate results survive a JSON round trip.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod non_finite {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Amount::deserialize(deserializer)? {
            Amount::Number(value) => Ok(value),
            Amount::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!("invalid amount {:?}", other))),
            },
        }
    }
}

/// One forecast year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedCashFlow {
    /// Forecast year, starting at 1
    pub year: u32,

    /// FCF grown at the projection growth rate
    #[serde(rename = "projectedFCF", with = "non_finite")]
    pub projected_fcf: f64,

    /// `projected_fcf` discounted at WACC
    #[serde(with = "non_finite")]
    pub present_value: f64,
}

/// Complete valuation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Forecast years in ascending order
    pub projected_cash_flows: Vec<ProjectedCashFlow>,

    /// Sum of every `present_value`
    #[serde(with = "non_finite")]
    pub sum_pv_cash_flows: f64,

    /// Undiscounted Gordon-growth terminal value
    #[serde(with = "non_finite")]
    pub terminal_value: f64,

    /// Terminal value discounted back over the projection window
    #[serde(with = "non_finite")]
    pub pv_terminal_value: f64,

    /// `sum_pv_cash_flows + pv_terminal_value`
    #[serde(with = "non_finite")]
    pub enterprise_value: f64,

    /// `enterprise_value - debt + cash`
    #[serde(with = "non_finite")]
    pub equity_value: f64,

    /// `equity_value / shares_outstanding`
    #[serde(with = "non_finite")]
    pub intrinsic_value_per_share: f64,
}

impl ValuationResult {
    /// Whether every headline figure is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.sum_pv_cash_flows,
            self.pv_terminal_value,
            self.enterprise_value,
            self.equity_value,
            self.intrinsic_value_per_share,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ValuationSummary {
        let final_fcf = self.projected_cash_flows.last().map(|r| r.projected_fcf);
        let terminal_value_share = if self.enterprise_value != 0.0 {
            self.pv_terminal_value / self.enterprise_value
        } else {
            f64::NAN
        };

        ValuationSummary {
            projection_years: self.projected_cash_flows.len() as u32,
            final_fcf,
            sum_pv_cash_flows: self.sum_pv_cash_flows,
            pv_terminal_value: self.pv_terminal_value,
            terminal_value_share,
        }
    }
}

/// Summary statistics for a valuation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSummary {
    pub projection_years: u32,
    /// Last explicit forecast, None for an empty window
    pub final_fcf: Option<f64>,
    #[serde(with = "non_finite")]
    pub sum_pv_cash_flows: f64,
    #[serde(with = "non_finite")]
    pub pv_terminal_value: f64,
    /// Fraction of enterprise value coming from the terminal value
    #[serde(with = "non_finite")]
    pub terminal_value_share: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degenerate() -> ValuationResult {
        ValuationResult {
            projected_cash_flows: vec![ProjectedCashFlow {
                year: 1,
                projected_fcf: f64::INFINITY,
                present_value: f64::NAN,
            }],
            sum_pv_cash_flows: f64::NAN,
            terminal_value: f64::NEG_INFINITY,
            pv_terminal_value: f64::NEG_INFINITY,
            enterprise_value: f64::NAN,
            equity_value: 12.5,
            intrinsic_value_per_share: 0.125,
        }
    }

    #[test]
    fn test_non_finite_json_round_trip() {
        let json = serde_json::to_string(&degenerate()).unwrap();
        assert!(json.contains(r#""projectedFCF":"Infinity""#));
        assert!(json.contains(r#""presentValue":"NaN""#));
        assert!(json.contains(r#""pvTerminalValue":"-Infinity""#));
        assert!(json.contains(r#""equityValue":12.5"#));

        let back: ValuationResult = serde_json::from_str(&json).unwrap();
        assert!(back.projected_cash_flows[0].projected_fcf.is_infinite());
        assert!(back.projected_cash_flows[0].present_value.is_nan());
        assert!(back.sum_pv_cash_flows.is_nan());
        assert_eq!(back.terminal_value, f64::NEG_INFINITY);
        assert_eq!(back.equity_value, 12.5);
        assert_eq!(back.intrinsic_value_per_share, 0.125);
        assert!(!back.is_finite());
    }

    #[test]
    fn test_unknown_amount_text_rejected() {
        let json = r#"{"year":1,"projectedFCF":"lots","presentValue":1.0}"#;
        assert!(serde_json::from_str::<ProjectedCashFlow>(json).is_err());
    }
}

//! Financial ratio calculator and interpreter

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_number, single_string_schema, to_output};
use crate::error::{FinanceError, Result};
use crate::metrics::round4;
use crate::ratios::RatioKind;

/// An interpreted ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    pub numerator: f64,
    pub denominator: f64,
    /// Requested type tag, lower-cased
    pub ratio_type: String,
    pub ratio_value: Option<f64>,
    pub description: Option<String>,
    pub interpretation: Option<String>,
    pub context: Option<String>,
    pub summary: String,
    pub error: Option<String>,
}

impl RatioResult {
    fn failed(err: &FinanceError) -> Self {
        let error = format!("Calculation error: {err}");
        Self {
            numerator: 0.0,
            denominator: 0.0,
            ratio_type: "error".to_string(),
            ratio_value: None,
            description: None,
            interpretation: None,
            context: None,
            summary: error.clone(),
            error: Some(error),
        }
    }
}

/// Tool dividing two figures and labelling the result against known thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioInterpreterTool;

impl RatioInterpreterTool {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a `"NUMERATOR DENOMINATOR [TYPE]"` query; failures are reported in the record
    pub fn interpret(&self, query: &str) -> RatioResult {
        self.try_interpret(query).unwrap_or_else(|e| RatioResult::failed(&e))
    }

    fn try_interpret(&self, query: &str) -> Result<RatioResult> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let [numerator, denominator, rest @ ..] = tokens.as_slice() else {
            return Err(FinanceError::invalid_input(
                "Query must contain at least numerator and denominator",
            ));
        };

        let numerator = parse_number(numerator, "numerator")?;
        let denominator = parse_number(denominator, "denominator")?;
        let ratio_type = rest
            .first()
            .map_or_else(|| RatioKind::Generic.tag().to_string(), |t| t.to_lowercase());

        if denominator == 0.0 {
            return Err(FinanceError::invalid_input("Denominator cannot be zero"));
        }

        let value = numerator / denominator;
        let kind = RatioKind::from_tag(&ratio_type);
        let description = kind.description();
        let context = kind.context(value);

        Ok(RatioResult {
            numerator,
            denominator,
            ratio_type,
            ratio_value: Some(round4(value)),
            description: Some(description.to_string()),
            interpretation: Some(format!("{description}: {value:.2}")),
            context: Some(context.to_string()),
            summary: format!("{description}: {value:.2} - {context}"),
            error: None,
        })
    }
}

#[async_trait]
impl Tool for RatioInterpreterTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let query = string_input(&params, "query");
        to_output(&self.interpret(&query))
    }

    fn name(&self) -> &str {
        "calculate_financial_ratio"
    }

    fn description(&self) -> &str {
        "Calculate and interpret a financial ratio. \
         Input format: 'NUMERATOR DENOMINATOR TYPE' (e.g. '82.50 5.50 pe'). \
         Types: pe, debt_to_equity, current, roe, generic."
    }

    fn input_schema(&self) -> Value {
        single_string_schema(
            "query",
            "Format \"NUMERATOR DENOMINATOR TYPE\", e.g. \"82.50 5.50 pe\"",
        )
    }
}

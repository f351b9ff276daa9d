//! Compound growth calculator

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parse_number, single_string_schema, to_output};
use crate::error::{FinanceError, Result};
use crate::format::format_amount;
use crate::metrics::{compound_growth, round2};

/// Future value of a principal compounded annually
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundGrowthResult {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub future_value: f64,
    pub total_growth: f64,
    pub total_return_pct: f64,
    pub summary: String,
    pub error: Option<String>,
}

impl CompoundGrowthResult {
    fn failed(err: &FinanceError) -> Self {
        let error = format!("Calculation error: {err}");
        Self {
            principal: 0.0,
            annual_rate: 0.0,
            years: 0.0,
            future_value: 0.0,
            total_growth: 0.0,
            total_return_pct: 0.0,
            summary: error.clone(),
            error: Some(error),
        }
    }
}

/// Tool computing `principal * (1 + rate)^years`
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundGrowthTool;

impl CompoundGrowthTool {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a `"PRINCIPAL RATE YEARS"` query; failures are reported in the record
    pub fn calculate(&self, query: &str) -> CompoundGrowthResult {
        self.try_calculate(query)
            .unwrap_or_else(|e| CompoundGrowthResult::failed(&e))
    }

    fn try_calculate(&self, query: &str) -> Result<CompoundGrowthResult> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let [principal, annual_rate, years, ..] = tokens.as_slice() else {
            return Err(FinanceError::invalid_input(
                "Query must contain principal, annual_rate, and years",
            ));
        };

        let principal = parse_number(principal, "principal")?;
        let annual_rate = parse_number(annual_rate, "annual_rate")?;
        let years = parse_number(years, "years")?;

        if principal <= 0.0 || years <= 0.0 {
            return Err(FinanceError::invalid_input(
                "Principal and years must be positive",
            ));
        }

        let growth = compound_growth(principal, annual_rate, years);
        if !growth.future_value.is_finite() {
            return Err(FinanceError::invalid_input(
                "Future value is not a finite number",
            ));
        }

        let summary = format!(
            "Investment: ${} at {:.2}% for {years} years → Future Value: ${} (Total Return: {:.2}%)",
            format_amount(principal),
            annual_rate * 100.0,
            format_amount(growth.future_value),
            growth.total_return_pct,
        );

        Ok(CompoundGrowthResult {
            principal,
            annual_rate,
            years,
            future_value: round2(growth.future_value),
            total_growth: round2(growth.total_growth),
            total_return_pct: round2(growth.total_return_pct),
            summary,
            error: None,
        })
    }
}

#[async_trait]
impl Tool for CompoundGrowthTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let query = string_input(&params, "query");
        to_output(&self.calculate(&query))
    }

    fn name(&self) -> &str {
        "calculate_compound_growth"
    }

    fn description(&self) -> &str {
        "Calculate compound growth and future value of an investment. \
         Input format: 'PRINCIPAL RATE YEARS' with the rate as a decimal \
         (e.g. '10000 0.07 10' for $10,000 at 7% for 10 years)."
    }

    fn input_schema(&self) -> Value {
        single_string_schema("query", "Format \"PRINCIPAL RATE YEARS\", e.g. \"10000 0.07 10\"")
    }
}

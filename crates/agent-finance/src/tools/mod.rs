//! Financial tools for LLM agents

pub mod company_profile;
pub mod compound_growth;
pub mod historical_performance;
pub mod ratio_interpreter;
pub mod stock_snapshot;
pub mod web_search;

pub use company_profile::{CompanyProfile, CompanyProfileTool};
pub use compound_growth::{CompoundGrowthResult, CompoundGrowthTool};
pub use historical_performance::{HistoricalPerformanceTool, HistoryMetrics};
pub use ratio_interpreter::{RatioInterpreterTool, RatioResult};
pub use stock_snapshot::{StockSnapshot, StockSnapshotTool};
pub use web_search::{SearchOutcome, WebSearchTool};

use serde::Serialize;
use serde_json::Value;

use crate::error::{FinanceError, Result};

/// Placeholder used when a query fails before symbol/period are known
pub const UNKNOWN: &str = "UNKNOWN";

/// Trim and upper-case a ticker symbol
pub fn normalize_symbol(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Reject an empty ticker
fn require_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(FinanceError::invalid_input("Ticker symbol is required"));
    }
    Ok(())
}

/// Parse a whitespace token as a finite number
fn parse_number(token: &str, field: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FinanceError::invalid_input(format!("Invalid number '{token}' for {field}")))
}

/// Serialize a result record as tool output
fn to_output<T: Serialize>(record: &T) -> agent_tools::Result<Value> {
    serde_json::to_value(record).map_err(|e| agent_tools::Error::ExecutionFailed(e.to_string()))
}

/// JSON schema for a tool taking one string argument
fn single_string_schema(key: &str, description: &str) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            key: {
                "type": "string",
                "description": description
            }
        },
        "required": [key]
    })
}

//! Financial data and calculation tools for LLM agents
//!
//! This crate exposes a small set of tools an agent can call to answer
//! financial questions:
//!
//! - `get_stock_price`: current price, market cap, P/E and 52-week range
//! - `get_company_info`: sector, industry, country and business description
//! - `get_financial_history`: total return, CAGR, volatility and max drawdown
//! - `calculate_compound_growth`: future value of an investment
//! - `calculate_financial_ratio`: ratio value with a threshold interpretation
//! - `tavily_search`: web search, when a Tavily API key is configured
//!
//! Market data comes from Yahoo Finance through [`api::MarketDataClient`];
//! web search goes through [`api::SearchClient`]. Every tool returns a result
//! record with an `error` field instead of failing.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_finance::{FinanceConfig, default_financial_tools};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FinanceConfig::from_env()?;
//!     let tools = default_financial_tools(&config);
//!
//!     let quote = tools.execute("get_stock_price", json!({ "symbol": "AAPL" })).await?;
//!     println!("{}", quote["summary"]);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod ratios;
pub mod registry;
pub mod tools;

pub use config::{FinanceConfig, FinanceConfigBuilder, SearchConfig, SearchDepth};
pub use error::{FinanceError, Result};
pub use ratios::RatioKind;
pub use registry::{build_financial_tools, default_financial_tools, register_tools};
pub use tools::{
    CompanyProfile, CompanyProfileTool, CompoundGrowthResult, CompoundGrowthTool,
    HistoricalPerformanceTool, HistoryMetrics, RatioInterpreterTool, RatioResult, SearchOutcome,
    StockSnapshot, StockSnapshotTool, WebSearchTool,
};

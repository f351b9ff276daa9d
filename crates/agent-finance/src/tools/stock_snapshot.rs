//! Tool for fetching the current stock price and key metrics

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::{normalize_symbol, require_symbol, single_string_schema, to_output};
use crate::api::MarketDataClient;
use crate::error::{FinanceError, Result};
use crate::format::format_integer;

/// Stock price and key metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<i64>,
    pub pe_ratio: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
    pub summary: String,
    pub error: Option<String>,
}

impl StockSnapshot {
    fn failed(symbol: String, err: &FinanceError) -> Self {
        Self {
            summary: format!("Error retrieving stock data for {symbol}: {err}"),
            symbol,
            current_price: None,
            market_cap: None,
            pe_ratio: None,
            week52_high: None,
            week52_low: None,
            error: Some(err.to_string()),
        }
    }
}

/// Tool for fetching the current price, market cap, P/E and 52-week range
pub struct StockSnapshotTool {
    client: Arc<dyn MarketDataClient>,
}

impl StockSnapshotTool {
    /// Create a new stock snapshot tool
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self { client }
    }

    /// Fetch a snapshot for a ticker; failures are reported in the record
    pub async fn snapshot(&self, input: &str) -> StockSnapshot {
        let symbol = normalize_symbol(input);
        match self.fetch_snapshot(&symbol).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "stock snapshot failed");
                StockSnapshot::failed(symbol, &e)
            }
        }
    }

    async fn fetch_snapshot(&self, symbol: &str) -> Result<StockSnapshot> {
        require_symbol(symbol)?;

        let quote = self.client.fetch_quote(symbol).await?;

        let current_price = quote.price().ok_or_else(|| FinanceError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "No price data available".to_string(),
        })?;
        let market_cap = quote.market_cap.map(|cap| cap.trunc() as i64);
        let pe_ratio = quote.pe_ratio();
        let week52_high = quote.fifty_two_week_high;
        let week52_low = quote.fifty_two_week_low;

        let mut parts = vec![
            format!("Stock: {symbol}"),
            format!("Price: ${current_price:.2}"),
        ];
        if let Some(cap) = market_cap {
            parts.push(format!("Market Cap: ${}", format_integer(cap)));
        }
        if let Some(pe) = pe_ratio {
            parts.push(format!("P/E: {pe:.2}"));
        }
        if let (Some(high), Some(low)) = (week52_high, week52_low) {
            parts.push(format!("52W Range: ${low:.2} - ${high:.2}"));
        }

        Ok(StockSnapshot {
            symbol: symbol.to_string(),
            current_price: Some(current_price),
            market_cap,
            pe_ratio,
            week52_high,
            week52_low,
            summary: parts.join(" | "),
            error: None,
        })
    }
}

#[async_trait]
impl Tool for StockSnapshotTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let symbol = string_input(&params, "symbol");
        to_output(&self.snapshot(&symbol).await)
    }

    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Get current stock price and key metrics. \
         Returns price, market capitalization, P/E ratio and 52-week range for a ticker \
         symbol (e.g. 'AAPL', 'TSLA', 'NVDA')."
    }

    fn input_schema(&self) -> Value {
        single_string_schema("symbol", "Stock ticker symbol (e.g., 'AAPL', 'TSLA', 'NVDA')")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QuoteSnapshot;
    use crate::api::market_data::MockMarketDataClient;
    use serde_json::json;

    fn full_quote() -> QuoteSnapshot {
        QuoteSnapshot {
            current_price: Some(190.123),
            regular_market_price: Some(189.0),
            market_cap: Some(2_950_000_000_000.7),
            trailing_pe: Some(29.456),
            forward_pe: Some(26.0),
            fifty_two_week_high: Some(199.62),
            fifty_two_week_low: Some(164.08),
            ..Default::default()
        }
    }

    fn tool_returning(quote: QuoteSnapshot) -> StockSnapshotTool {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_quote().returning(move |symbol| {
            assert_eq!(symbol, "AAPL");
            Ok(quote.clone())
        });
        StockSnapshotTool::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_snapshot_normalizes_symbol() {
        let tool = tool_returning(full_quote());
        let snapshot = tool.snapshot("  aapl \n").await;

        assert_eq!(snapshot.symbol, "AAPL");
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.current_price, Some(190.123));
        assert_eq!(snapshot.market_cap, Some(2_950_000_000_000));
        assert_eq!(snapshot.pe_ratio, Some(29.456));
        assert_eq!(
            snapshot.summary,
            "Stock: AAPL | Price: $190.12 | Market Cap: $2,950,000,000,000 | P/E: 29.46 | 52W Range: $164.08 - $199.62"
        );
    }

    #[tokio::test]
    async fn test_snapshot_falls_back_to_regular_price_and_forward_pe() {
        let tool = tool_returning(QuoteSnapshot {
            regular_market_price: Some(50.0),
            forward_pe: Some(12.5),
            fifty_two_week_high: Some(60.0),
            ..Default::default()
        });
        let snapshot = tool.snapshot("aapl").await;

        assert_eq!(snapshot.current_price, Some(50.0));
        assert_eq!(snapshot.pe_ratio, Some(12.5));
        // A one-sided range is left out of the summary
        assert_eq!(snapshot.summary, "Stock: AAPL | Price: $50.00 | P/E: 12.50");
    }

    #[tokio::test]
    async fn test_snapshot_without_price_is_error() {
        let tool = tool_returning(QuoteSnapshot {
            market_cap: Some(1e9),
            ..Default::default()
        });
        let snapshot = tool.snapshot("AAPL").await;

        assert!(snapshot.error.is_some());
        assert_eq!(snapshot.current_price, None);
        assert_eq!(snapshot.market_cap, None);
        assert!(snapshot.summary.starts_with("Error retrieving stock data for AAPL: "));
    }

    #[tokio::test]
    async fn test_snapshot_upstream_failure() {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_quote()
            .returning(|_| Err(FinanceError::YahooFinanceError("connection reset".to_string())));
        let tool = StockSnapshotTool::new(Arc::new(mock));

        let snapshot = tool.snapshot("msft").await;
        assert_eq!(snapshot.symbol, "MSFT");
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Yahoo Finance error: connection reset")
        );
        assert_eq!(
            snapshot.summary,
            "Error retrieving stock data for MSFT: Yahoo Finance error: connection reset"
        );
        assert!(snapshot.pe_ratio.is_none());
        assert!(snapshot.week52_high.is_none());
        assert!(snapshot.week52_low.is_none());
    }

    #[tokio::test]
    async fn test_empty_symbol_never_reaches_client() {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_quote().never();
        let tool = StockSnapshotTool::new(Arc::new(mock));

        let snapshot = tool.snapshot("   ").await;
        assert_eq!(snapshot.error.as_deref(), Some("Ticker symbol is required"));
    }

    #[tokio::test]
    async fn test_snapshot_is_idempotent() {
        let tool = tool_returning(full_quote());
        assert_eq!(tool.snapshot("AAPL").await, tool.snapshot("aapl").await);
    }

    #[tokio::test]
    async fn test_execute_returns_record_json() {
        let tool = tool_returning(full_quote());
        let out = tool.execute(json!({ "symbol": "aapl" })).await.unwrap();

        assert_eq!(out["symbol"], "AAPL");
        assert_eq!(out["market_cap"], 2_950_000_000_000_i64);
        assert!(out["error"].is_null());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = StockSnapshotTool::new(Arc::new(MockMarketDataClient::new()));

        assert_eq!(tool.name(), "get_stock_price");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["symbol"].is_object());
    }
}

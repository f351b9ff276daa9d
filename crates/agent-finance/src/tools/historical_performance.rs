//! Tool for computing historical performance metrics

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{UNKNOWN, normalize_symbol, single_string_schema, to_output};
use crate::api::MarketDataClient;
use crate::error::{FinanceError, Result};
use crate::metrics::{PerformanceMetrics, round2};

/// Period used when the query names only a symbol
pub const DEFAULT_PERIOD: &str = "1y";

/// Historical performance over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMetrics {
    pub symbol: String,
    pub period: String,
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub total_return_pct: Option<f64>,
    pub cagr_pct: Option<f64>,
    pub volatility_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub trading_days: Option<usize>,
    pub summary: String,
    pub error: Option<String>,
}

impl HistoryMetrics {
    fn empty(symbol: String, period: String, summary: String, error: String) -> Self {
        Self {
            symbol,
            period,
            start_price: None,
            end_price: None,
            total_return_pct: None,
            cagr_pct: None,
            volatility_pct: None,
            max_drawdown_pct: None,
            trading_days: None,
            summary,
            error: Some(error),
        }
    }

    fn no_data(symbol: String, period: String) -> Self {
        let summary = format!("No historical data available for {symbol}");
        Self::empty(symbol, period, summary, "No data available".to_string())
    }

    fn failed(symbol: String, period: String, err: &FinanceError) -> Self {
        let summary = format!("Error retrieving financial history: {err}");
        Self::empty(symbol, period, summary, err.to_string())
    }

    fn from_metrics(symbol: String, period: String, m: &PerformanceMetrics) -> Self {
        let total_return = round2(m.total_return_pct);
        let cagr = round2(m.cagr_pct);
        let volatility = round2(m.volatility_pct);
        let drawdown = round2(m.max_drawdown_pct);

        let summary = format!(
            "{symbol} Performance ({period}): Total Return: {total_return:.2}%, CAGR: {cagr:.2}%, \
             Volatility: {volatility:.2}%, Max Drawdown: {drawdown:.2}%"
        );

        Self {
            symbol,
            period,
            start_price: Some(round2(m.start_price)),
            end_price: Some(round2(m.end_price)),
            total_return_pct: Some(total_return),
            cagr_pct: Some(cagr),
            volatility_pct: Some(volatility),
            max_drawdown_pct: Some(drawdown),
            trading_days: Some(m.trading_days),
            summary,
            error: None,
        }
    }
}

/// Split `"SYMBOL [PERIOD]"` into an upper-cased symbol and a lower-cased period
fn parse_query(query: &str) -> Option<(String, String)> {
    let mut tokens = query.split_whitespace();
    let symbol = normalize_symbol(tokens.next()?);
    let period = tokens
        .next()
        .map_or_else(|| DEFAULT_PERIOD.to_string(), str::to_lowercase);
    Some((symbol, period))
}

/// Tool for total return, CAGR, volatility and max drawdown over a period
pub struct HistoricalPerformanceTool {
    client: Arc<dyn MarketDataClient>,
}

impl HistoricalPerformanceTool {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self { client }
    }

    /// Compute performance metrics for a `"SYMBOL PERIOD"` query
    ///
    /// Failures are reported in the record. Symbol and period are
    /// `UNKNOWN` when the query cannot be split.
    pub async fn history(&self, query: &str) -> HistoryMetrics {
        let Some((symbol, period)) = parse_query(query) else {
            let err = FinanceError::invalid_input("Query must contain a ticker symbol");
            return HistoryMetrics::failed(UNKNOWN.to_string(), UNKNOWN.to_string(), &err);
        };

        match self.fetch_closes(&symbol, &period).await {
            Ok(closes) if closes.is_empty() => HistoryMetrics::no_data(symbol, period),
            Ok(closes) => match PerformanceMetrics::from_closes(&closes) {
                Ok(metrics) => {
                    debug!(
                        symbol = %symbol,
                        period = %period,
                        trading_days = metrics.trading_days,
                        "computed performance metrics"
                    );
                    HistoryMetrics::from_metrics(symbol, period, &metrics)
                }
                Err(e) => HistoryMetrics::failed(symbol, period, &e),
            },
            Err(e) => {
                warn!(symbol = %symbol, period = %period, error = %e, "history fetch failed");
                HistoryMetrics::failed(symbol, period, &e)
            }
        }
    }

    /// Usable split- and dividend-adjusted closes, oldest first
    async fn fetch_closes(&self, symbol: &str, period: &str) -> Result<Vec<f64>> {
        let bars = self.client.fetch_history(symbol, period).await?;
        Ok(bars
            .iter()
            .map(|bar| bar.adj_close)
            .filter(|close| close.is_finite() && *close > 0.0)
            .collect())
    }
}

#[async_trait]
impl Tool for HistoricalPerformanceTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let query = string_input(&params, "query");
        to_output(&self.history(&query).await)
    }

    fn name(&self) -> &str {
        "get_financial_history"
    }

    fn description(&self) -> &str {
        "Get historical performance for a stock: total return, CAGR, annualized volatility \
         and maximum drawdown. Input format: 'SYMBOL PERIOD' (e.g. 'AAPL 5y'). \
         Periods: 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max. Defaults to 1y."
    }

    fn input_schema(&self) -> Value {
        single_string_schema("query", "Format \"SYMBOL PERIOD\", e.g. \"AAPL 5y\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PriceBar;
    use crate::api::market_data::MockMarketDataClient;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: close,
                volume: 1_000,
            })
            .collect()
    }

    fn tool_returning(series: Vec<PriceBar>) -> HistoricalPerformanceTool {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_history()
            .returning(move |_, _| Ok(series.clone()));
        HistoricalPerformanceTool::new(Arc::new(mock))
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_query("aapl 5Y"),
            Some(("AAPL".to_string(), "5y".to_string()))
        );
        assert_eq!(
            parse_query("  msft  "),
            Some(("MSFT".to_string(), "1y".to_string()))
        );
        assert_eq!(parse_query("   "), None);
    }

    #[tokio::test]
    async fn test_history_passes_normalized_tokens() {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_history().times(1).returning(|symbol, period| {
            assert_eq!(symbol, "AAPL");
            assert_eq!(period, "5y");
            Ok(Vec::new())
        });
        let tool = HistoricalPerformanceTool::new(Arc::new(mock));

        tool.history("aapl 5Y").await;
    }

    #[tokio::test]
    async fn test_history_metrics() {
        let tool = tool_returning(bars(&[100.0, 120.0, 90.0, 110.0, 130.0]));
        let record = tool.history("SPY 1mo").await;

        assert!(record.error.is_none());
        assert_eq!(record.symbol, "SPY");
        assert_eq!(record.period, "1mo");
        assert_eq!(record.start_price, Some(100.0));
        assert_eq!(record.end_price, Some(130.0));
        assert_eq!(record.total_return_pct, Some(30.0));
        assert_eq!(record.max_drawdown_pct, Some(-25.0));
        assert_eq!(record.trading_days, Some(5));
        assert!(record.volatility_pct.unwrap() > 0.0);
        assert!(record.cagr_pct.unwrap() > record.total_return_pct.unwrap());
        assert!(record.summary.starts_with(
            "SPY Performance (1mo): Total Return: 30.00%, CAGR: "
        ));
        assert!(record.summary.ends_with("Max Drawdown: -25.00%"));
    }

    #[tokio::test]
    async fn test_history_empty_series() {
        let tool = tool_returning(Vec::new());
        let record = tool.history("AAPL").await;

        assert_eq!(record.error.as_deref(), Some("No data available"));
        assert_eq!(record.summary, "No historical data available for AAPL");
        assert_eq!(record.period, "1y");
        assert!(record.start_price.is_none());
        assert!(record.total_return_pct.is_none());
        assert!(record.trading_days.is_none());
    }

    #[tokio::test]
    async fn test_history_discards_unusable_closes() {
        let tool = tool_returning(bars(&[f64::NAN, 0.0, -4.0]));
        let record = tool.history("AAPL").await;
        assert_eq!(record.error.as_deref(), Some("No data available"));

        let tool = tool_returning(bars(&[100.0, f64::NAN, 110.0]));
        let record = tool.history("AAPL").await;
        assert_eq!(record.trading_days, Some(2));
        assert_eq!(record.total_return_pct, Some(10.0));
    }

    #[tokio::test]
    async fn test_history_uses_adjusted_closes() {
        // Raw closes are flat; the adjusted series carries a dividend
        let mut series = bars(&[100.0, 100.0, 100.0]);
        for (bar, adj) in series.iter_mut().zip([95.0, 97.5, 100.0]) {
            bar.adj_close = adj;
        }
        let tool = tool_returning(series);
        let record = tool.history("KO 5y").await;

        assert!(record.error.is_none());
        assert_eq!(record.start_price, Some(95.0));
        assert_eq!(record.end_price, Some(100.0));
        assert_eq!(record.total_return_pct, Some(5.26));
        assert!(record.cagr_pct.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_history_single_close_is_insufficient() {
        let tool = tool_returning(bars(&[42.0]));
        let record = tool.history("AAPL").await;

        assert_eq!(
            record.error.as_deref(),
            Some("Insufficient data: at least 2 closing prices are required")
        );
        assert_eq!(
            record.summary,
            "Error retrieving financial history: Insufficient data: at least 2 closing prices are required"
        );
    }

    #[tokio::test]
    async fn test_history_two_closes_zero_volatility() {
        let tool = tool_returning(bars(&[100.0, 105.0]));
        let record = tool.history("AAPL").await;

        assert!(record.error.is_none());
        assert_eq!(record.volatility_pct, Some(0.0));
    }

    #[tokio::test]
    async fn test_history_upstream_failure() {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_history().returning(|_, _| {
            Err(FinanceError::YahooFinanceError("invalid range 7w".to_string()))
        });
        let tool = HistoricalPerformanceTool::new(Arc::new(mock));

        let record = tool.history("aapl 7W").await;
        assert_eq!(record.symbol, "AAPL");
        assert_eq!(record.period, "7w");
        assert_eq!(
            record.summary,
            "Error retrieving financial history: Yahoo Finance error: invalid range 7w"
        );
    }

    #[tokio::test]
    async fn test_history_empty_query() {
        let mut mock = MockMarketDataClient::new();
        mock.expect_fetch_history().never();
        let tool = HistoricalPerformanceTool::new(Arc::new(mock));

        let record = tool.history("").await;
        assert_eq!(record.symbol, "UNKNOWN");
        assert_eq!(record.period, "UNKNOWN");
        assert!(record.error.is_some());
    }

    #[tokio::test]
    async fn test_execute_returns_record_json() {
        let tool = tool_returning(bars(&[50.0, 55.0, 60.5]));
        let out = tool.execute(json!({ "query": "qqq 6mo" })).await.unwrap();

        assert_eq!(out["symbol"], "QQQ");
        assert_eq!(out["period"], "6mo");
        assert_eq!(out["trading_days"], 3);
        assert_eq!(out["total_return_pct"], 21.0);
    }
}

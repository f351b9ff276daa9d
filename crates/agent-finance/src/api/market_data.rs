//! Market data contract consumed by the financial tools

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Quote fields returned by a market data provider
///
/// Every field is optional; providers omit what they do not know. The
/// accessors encode which field wins when several could answer the same
/// question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Live trading price
    pub current_price: Option<f64>,
    /// Delayed/regular-market price
    pub regular_market_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub full_time_employees: Option<u64>,
    pub long_business_summary: Option<String>,
}

impl QuoteSnapshot {
    /// Live price, falling back to the regular-market price
    pub fn price(&self) -> Option<f64> {
        self.current_price.or(self.regular_market_price)
    }

    /// Trailing P/E, falling back to forward P/E
    pub fn pe_ratio(&self) -> Option<f64> {
        self.trailing_pe.or(self.forward_pe)
    }

    /// Long-form company name, falling back to the short name
    pub fn display_name(&self) -> Option<&str> {
        self.long_name.as_deref().or(self.short_name.as_deref())
    }
}

/// One bar of a historical price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Close adjusted for splits and dividends
    pub adj_close: f64,
    pub volume: u64,
}

/// Source of quotes and price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetch the current quote fields for a symbol
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot>;

    /// Fetch the daily price series for a symbol over `period`
    ///
    /// `period` is a range token such as `1y`, `5y` or `max`; tokens the
    /// provider does not recognise are passed through and its rejection is
    /// returned as an error.
    async fn fetch_history(&self, symbol: &str, period: &str) -> Result<Vec<PriceBar>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_prefers_current() {
        let quote = QuoteSnapshot {
            current_price: Some(101.5),
            regular_market_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(quote.price(), Some(101.5));

        let quote = QuoteSnapshot {
            regular_market_price: Some(100.0),
            ..Default::default()
        };
        assert_eq!(quote.price(), Some(100.0));
        assert_eq!(QuoteSnapshot::default().price(), None);
    }

    #[test]
    fn test_pe_prefers_trailing() {
        let quote = QuoteSnapshot {
            trailing_pe: Some(28.1),
            forward_pe: Some(24.0),
            ..Default::default()
        };
        assert_eq!(quote.pe_ratio(), Some(28.1));

        let quote = QuoteSnapshot {
            forward_pe: Some(24.0),
            ..Default::default()
        };
        assert_eq!(quote.pe_ratio(), Some(24.0));
    }

    #[test]
    fn test_display_name_prefers_long() {
        let quote = QuoteSnapshot {
            long_name: Some("Apple Inc.".to_string()),
            short_name: Some("Apple".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.display_name(), Some("Apple Inc."));

        let quote = QuoteSnapshot {
            short_name: Some("Apple".to_string()),
            ..Default::default()
        };
        assert_eq!(quote.display_name(), Some("Apple"));
    }
}

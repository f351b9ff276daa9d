//! API clients for market data and web search providers

pub mod market_data;
pub mod search;
pub mod tavily;
pub mod yahoo;

pub use market_data::{MarketDataClient, PriceBar, QuoteSnapshot};
pub use search::{SearchClient, SearchHit, SearchResponse};
pub use tavily::TavilyClient;
pub use yahoo::YahooFinanceClient;

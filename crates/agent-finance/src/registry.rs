//! Assembly of the financial tool set

use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{MarketDataClient, SearchClient, TavilyClient, YahooFinanceClient};
use crate::config::FinanceConfig;
use crate::tools::{
    CompanyProfileTool, CompoundGrowthTool, HistoricalPerformanceTool, RatioInterpreterTool,
    StockSnapshotTool, WebSearchTool,
};

/// Build the financial tools backed by Yahoo Finance
///
/// See [`build_financial_tools`].
pub fn default_financial_tools(config: &FinanceConfig) -> ToolRegistry {
    build_financial_tools(config, Arc::new(YahooFinanceClient::new(config)))
}

/// Build the financial tools over a market data client
///
/// The web search tool is added when a Tavily client can be constructed from
/// `config`; otherwise a warning is logged and only the five computation
/// tools are registered. This never fails.
pub fn build_financial_tools(
    config: &FinanceConfig,
    market_data: Arc<dyn MarketDataClient>,
) -> ToolRegistry {
    let search = match TavilyClient::new(config) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn SearchClient>),
        Err(e) => {
            warn!("Tavily search not available: {}", e);
            None
        }
    };
    register_tools(market_data, search)
}

/// Register the tools in presentation order
pub fn register_tools(
    market_data: Arc<dyn MarketDataClient>,
    search: Option<Arc<dyn SearchClient>>,
) -> ToolRegistry {
    let registry = ToolRegistry::new();

    registry.register(Arc::new(StockSnapshotTool::new(Arc::clone(&market_data))));
    registry.register(Arc::new(CompanyProfileTool::new(Arc::clone(&market_data))));
    registry.register(Arc::new(HistoricalPerformanceTool::new(market_data)));
    registry.register(Arc::new(CompoundGrowthTool::new()));
    registry.register(Arc::new(RatioInterpreterTool::new()));

    if let Some(search) = search {
        registry.register(Arc::new(WebSearchTool::new(search)));
    }

    info!("Loaded {} financial tools", registry.len());
    registry
}

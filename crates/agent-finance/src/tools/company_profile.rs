//! Tool for fetching descriptive company information

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::{normalize_symbol, require_symbol, single_string_schema, to_output};
use crate::api::MarketDataClient;
use crate::error::{FinanceError, Result};

const NO_BUSINESS_SUMMARY: &str = "No business summary available";

/// Company profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub employees: Option<u64>,
    pub business_summary: Option<String>,
    pub error: Option<String>,
}

impl CompanyProfile {
    fn failed(symbol: String, err: &FinanceError) -> Self {
        Self {
            business_summary: Some(format!("Error retrieving company info for {symbol}: {err}")),
            symbol,
            name: None,
            sector: None,
            industry: None,
            country: None,
            employees: None,
            error: Some(err.to_string()),
        }
    }
}

/// Tool for fetching company name, sector, industry and business description
pub struct CompanyProfileTool {
    client: Arc<dyn MarketDataClient>,
}

impl CompanyProfileTool {
    pub fn new(client: Arc<dyn MarketDataClient>) -> Self {
        Self { client }
    }

    /// Fetch the profile for a ticker; failures are reported in the record
    pub async fn profile(&self, input: &str) -> CompanyProfile {
        let symbol = normalize_symbol(input);
        match self.fetch_profile(&symbol).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "company profile failed");
                CompanyProfile::failed(symbol, &e)
            }
        }
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        require_symbol(symbol)?;

        let quote = self.client.fetch_quote(symbol).await?;

        Ok(CompanyProfile {
            symbol: symbol.to_string(),
            name: quote.display_name().map(str::to_string),
            business_summary: Some(
                quote
                    .long_business_summary
                    .unwrap_or_else(|| NO_BUSINESS_SUMMARY.to_string()),
            ),
            sector: quote.sector,
            industry: quote.industry,
            country: quote.country,
            employees: quote.full_time_employees,
            error: None,
        })
    }
}

#[async_trait]
impl Tool for CompanyProfileTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let symbol = string_input(&params, "symbol");
        to_output(&self.profile(&symbol).await)
    }

    fn name(&self) -> &str {
        "get_company_info"
    }

    fn description(&self) -> &str {
        "Get company information including sector, industry, country, employee count \
         and a business description."
    }

    fn input_schema(&self) -> Value {
        single_string_schema("symbol", "Stock ticker symbol (e.g., 'AAPL', 'MSFT')")
    }
}

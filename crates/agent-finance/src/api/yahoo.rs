//! Yahoo Finance API client

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;
use yahoo_finance_api as yahoo;

use crate::api::market_data::{MarketDataClient, PriceBar, QuoteSnapshot};
use crate::config::FinanceConfig;
use crate::error::{FinanceError, Result};

const COOKIE_URL: &str = "https://fc.yahoo.com";
const REFERER: &str = "https://finance.yahoo.com/";
const QUOTE_MODULES: &str = "price,summaryDetail,defaultKeyStatistics,financialData,assetProfile";

/// Yahoo Finance API client
///
/// Quote fields come from the `quoteSummary` endpoint, which needs a session
/// cookie and a crumb token. Each call opens its own session, so nothing is
/// carried between calls.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &FinanceConfig) -> Self {
        Self {
            base_url: config.yahoo_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout,
        }
    }

    fn session(&self) -> Result<Client> {
        Ok(Client::builder()
            .cookie_store(true)
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FinanceError::ConfigError(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| {
                FinanceError::ConfigError(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Obtain a crumb token for the session
    async fn crumb(&self, client: &Client) -> Result<String> {
        // The cookie endpoint usually answers 404 but still sets the session cookie.
        client
            .get(COOKIE_URL)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?;

        let response = client
            .get(self.endpoint(&["v1", "test", "getcrumb"])?)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let crumb = body.trim();
        if !status.is_success() || crumb.is_empty() || crumb.contains('<') {
            return Err(FinanceError::YahooFinanceError(format!(
                "failed to obtain crumb (status {status})"
            )));
        }
        Ok(crumb.to_string())
    }
}

#[async_trait]
impl MarketDataClient for YahooFinanceClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let client = self.session()?;
        let crumb = self.crumb(&client).await?;

        let url = self.endpoint(&["v10", "finance", "quoteSummary", symbol])?;
        debug!(%url, "Yahoo quoteSummary request");

        let response = client
            .get(url)
            .query(&[("modules", QUOTE_MODULES), ("crumb", crumb.as_str())])
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Yahoo reports unknown symbols as a 404 carrying a JSON error body,
        // so the body is parsed before the status is judged.
        match parse_quote_summary(symbol, &body) {
            Err(FinanceError::JsonError(_)) if !status.is_success() => Err(
                FinanceError::YahooFinanceError(format!("quoteSummary returned status {status}")),
            ),
            other => other,
        }
    }

    async fn fetch_history(&self, symbol: &str, period: &str) -> Result<Vec<PriceBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        debug!(symbol, period, "Yahoo history request");

        let response = provider
            .get_quote_range(symbol, "1d", period)
            .await
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| FinanceError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| PriceBar {
                timestamp: DateTime::from_timestamp(q.timestamp, 0)
                    .unwrap_or(DateTime::UNIX_EPOCH),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                adj_close: q.adjclose,
                volume: q.volume,
            })
            .collect())
    }
}

/// Parse a `quoteSummary` response body into a [`QuoteSnapshot`]
pub fn parse_quote_summary(symbol: &str, body: &str) -> Result<QuoteSnapshot> {
    let envelope: QuoteSummaryEnvelope = serde_json::from_str(body)?;
    let summary = envelope.quote_summary;

    if let Some(error) = summary.error {
        let reason = error
            .description
            .or(error.code)
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(FinanceError::DataUnavailable {
            symbol: symbol.to_string(),
            reason,
        });
    }

    let result = summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| FinanceError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "empty quote summary".to_string(),
        })?;

    Ok(result.into_snapshot())
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
    financial_data: Option<FinancialDataModule>,
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PriceModule {
    regular_market_price: Option<RawValue>,
    market_cap: Option<RawValue>,
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SummaryDetailModule {
    market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    fifty_two_week_high: Option<RawValue>,
    fifty_two_week_low: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeyStatisticsModule {
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FinancialDataModule {
    current_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AssetProfileModule {
    sector: Option<String>,
    industry: Option<String>,
    country: Option<String>,
    full_time_employees: Option<u64>,
    long_business_summary: Option<String>,
}

/// Yahoo wraps numbers as `{ "raw": 1.0, "fmt": "1.00" }`, or `{}` when unknown.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

fn raw(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw).filter(|v| v.is_finite())
}

fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl QuoteSummaryResult {
    fn into_snapshot(self) -> QuoteSnapshot {
        let price = self.price.unwrap_or_default();
        let detail = self.summary_detail.unwrap_or_default();
        let stats = self.default_key_statistics.unwrap_or_default();
        let financial = self.financial_data.unwrap_or_default();
        let profile = self.asset_profile.unwrap_or_default();

        QuoteSnapshot {
            current_price: raw(financial.current_price.as_ref()),
            regular_market_price: raw(price.regular_market_price.as_ref()),
            market_cap: raw(price.market_cap.as_ref()).or(raw(detail.market_cap.as_ref())),
            trailing_pe: raw(detail.trailing_pe.as_ref()),
            forward_pe: raw(detail.forward_pe.as_ref()).or(raw(stats.forward_pe.as_ref())),
            fifty_two_week_high: raw(detail.fifty_two_week_high.as_ref()),
            fifty_two_week_low: raw(detail.fifty_two_week_low.as_ref()),
            long_name: text(price.long_name),
            short_name: text(price.short_name),
            sector: text(profile.sector),
            industry: text(profile.industry),
            country: text(profile.country),
            full_time_employees: profile.full_time_employees,
            long_business_summary: text(profile.long_business_summary),
        }
    }
}

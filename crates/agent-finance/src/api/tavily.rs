//! Tavily web search client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::api::search::{SearchClient, SearchResponse};
use crate::config::{FinanceConfig, SearchDepth};
use crate::error::{FinanceError, Result};

/// Tavily search API client
#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    endpoint: String,
    max_results: u32,
    search_depth: SearchDepth,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: SearchDepth,
    include_answer: bool,
    include_raw_content: bool,
    include_images: bool,
}

impl TavilyClient {
    /// Create a client from configuration
    ///
    /// Fails when no API key is configured or the search settings are invalid.
    pub fn new(config: &FinanceConfig) -> Result<Self> {
        let search = &config.search;
        let api_key = search
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                FinanceError::ConfigError("TAVILY_API_KEY is not set".to_string())
            })?;
        search.validate()?;

        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: search.endpoint.clone(),
            max_results: search.max_results,
            search_depth: search.search_depth,
            include_answer: search.include_answer,
            include_raw_content: search.include_raw_content,
            include_images: search.include_images,
        })
    }

    fn request<'a>(&'a self, query: &'a str) -> SearchRequest<'a> {
        SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
            search_depth: self.search_depth,
            include_answer: self.include_answer,
            include_raw_content: self.include_raw_content,
            include_images: self.include_images,
        }
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!(query, depth = %self.search_depth, "Tavily search request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(query))
            .send()
            .await
            .map_err(|e| FinanceError::SearchError(format!("Tavily request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FinanceError::SearchError(format!(
                "Tavily API error {status}: {body}"
            )));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| FinanceError::SearchError(format!("Failed to parse Tavily response: {e}")))
    }
}

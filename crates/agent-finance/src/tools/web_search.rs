//! Web search exposed as an agent tool

use agent_tools::{Tool, string_input};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::{single_string_schema, to_output};
use crate::api::{SearchClient, SearchHit};
use crate::error::{FinanceError, Result};

/// Search results for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub answer: Option<String>,
    pub results: Vec<SearchHit>,
    pub summary: String,
    pub error: Option<String>,
}

impl SearchOutcome {
    fn failed(query: String, err: &FinanceError) -> Self {
        Self {
            summary: format!("Search failed for \"{query}\": {err}"),
            query,
            answer: None,
            results: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Tool running a web search through a [`SearchClient`]
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Run a search; failures are reported in the record
    pub async fn search(&self, input: &str) -> SearchOutcome {
        let query = input.trim().to_string();
        match self.try_search(&query).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(query = %query, error = %e, "web search failed");
                SearchOutcome::failed(query, &e)
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<SearchOutcome> {
        if query.is_empty() {
            return Err(FinanceError::invalid_input("Search query is required"));
        }

        let response = self.client.search(query).await?;
        let answer = response.answer.filter(|a| !a.trim().is_empty());
        let summary = answer.clone().unwrap_or_else(|| {
            format!("Found {} results for \"{query}\"", response.results.len())
        });

        Ok(SearchOutcome {
            query: query.to_string(),
            answer,
            results: response.results,
            summary,
            error: None,
        })
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let query = string_input(&params, "query");
        to_output(&self.search(&query).await)
    }

    fn name(&self) -> &str {
        "tavily_search"
    }

    fn description(&self) -> &str {
        "Search the web for recent financial news, earnings reports, analyst commentary \
         and market events. Returns a synthesized answer and the top matching sources."
    }

    fn input_schema(&self) -> Value {
        single_string_schema("query", "Search query, e.g. \"NVDA latest earnings guidance\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchResponse;
    use crate::api::search::MockSearchClient;
    use serde_json::json;

    fn hit(title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            content: "content".to_string(),
            score: 0.8,
        }
    }

    #[tokio::test]
    async fn test_search_with_answer() {
        let mut mock = MockSearchClient::new();
        mock.expect_search().returning(|query| {
            assert_eq!(query, "fed rate decision");
            Ok(SearchResponse {
                answer: Some("Rates held steady.".to_string()),
                results: vec![hit("a"), hit("b")],
            })
        });
        let tool = WebSearchTool::new(Arc::new(mock));

        let outcome = tool.search("  fed rate decision ").await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.query, "fed rate decision");
        assert_eq!(outcome.summary, "Rates held steady.");
        assert_eq!(outcome.results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_without_answer() {
        let mut mock = MockSearchClient::new();
        mock.expect_search().returning(|_| {
            Ok(SearchResponse {
                answer: Some("   ".to_string()),
                results: vec![hit("a"), hit("b"), hit("c")],
            })
        });
        let tool = WebSearchTool::new(Arc::new(mock));

        let outcome = tool.search("tsla deliveries").await;
        assert!(outcome.answer.is_none());
        assert_eq!(outcome.summary, "Found 3 results for \"tsla deliveries\"");
    }

    #[tokio::test]
    async fn test_search_failure() {
        let mut mock = MockSearchClient::new();
        mock.expect_search().returning(|_| {
            Err(FinanceError::SearchError("Tavily API error 401".to_string()))
        });
        let tool = WebSearchTool::new(Arc::new(mock));

        let outcome = tool.search("anything").await;
        assert_eq!(
            outcome.error.as_deref(),
            Some("Search error: Tavily API error 401")
        );
        assert!(outcome.results.is_empty());
        assert!(outcome.answer.is_none());
    }

    #[tokio::test]
    async fn test_empty_query_skips_provider() {
        let mut mock = MockSearchClient::new();
        mock.expect_search().never();
        let tool = WebSearchTool::new(Arc::new(mock));

        let out = tool.execute(json!({ "query": "  " })).await.unwrap();
        assert_eq!(out["error"], "Search query is required");
        assert_eq!(out["results"], json!([]));
    }
}

//! Configuration for financial data tools

use crate::error::{FinanceError, Result};
use agent_utils::{ConfigError, parse_var};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default Yahoo Finance query host
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Default Tavily search endpoint
pub const DEFAULT_TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// How thoroughly the search provider should search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchDepth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(SearchDepth::Basic),
            "advanced" => Ok(SearchDepth::Advanced),
            other => Err(format!("expected basic or advanced, got '{other}'")),
        }
    }
}

/// Settings for the web search collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Tavily API key; search is disabled without one
    pub api_key: Option<String>,

    /// Maximum number of results per query
    pub max_results: u32,

    /// Search depth mode
    pub search_depth: SearchDepth,

    /// Ask the provider for a synthesized answer
    pub include_answer: bool,

    /// Include raw page content in results
    pub include_raw_content: bool,

    /// Include image results
    pub include_images: bool,

    /// Search API endpoint
    pub endpoint: String,

    /// Malformed search setting seen while loading; search stays disabled while set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_setting: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: 5,
            search_depth: SearchDepth::Advanced,
            include_answer: true,
            include_raw_content: false,
            include_images: false,
            endpoint: DEFAULT_TAVILY_ENDPOINT.to_string(),
            invalid_setting: None,
        }
    }
}

impl SearchConfig {
    /// Check the settings the search client depends on
    pub fn validate(&self) -> Result<()> {
        if let Some(problem) = &self.invalid_setting {
            return Err(FinanceError::ConfigError(problem.clone()));
        }

        if self.max_results == 0 {
            return Err(FinanceError::ConfigError(
                "search max_results must be greater than 0".to_string(),
            ));
        }

        Url::parse(&self.endpoint).map_err(|e| {
            FinanceError::ConfigError(format!("search endpoint '{}': {e}", self.endpoint))
        })?;

        Ok(())
    }
}

/// Configuration for the financial tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceConfig {
    /// Request timeout for upstream HTTP calls
    pub request_timeout: Duration,

    /// User agent sent to the market data provider
    pub user_agent: String,

    /// Yahoo Finance query host
    pub yahoo_base_url: String,

    /// Web search settings
    pub search: SearchConfig,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl FinanceConfig {
    /// Create a new configuration builder
    pub fn builder() -> FinanceConfigBuilder {
        FinanceConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Recognised variables: `TAVILY_API_KEY`, `TAVILY_MAX_RESULTS`,
    /// `TAVILY_SEARCH_DEPTH`, `FINANCE_REQUEST_TIMEOUT_SECS`,
    /// `FINANCE_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(agent_utils::env_var)
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// A malformed `TAVILY_*` value does not fail loading: the default is
    /// kept and the problem is recorded in [`SearchConfig::invalid_setting`],
    /// so only the search client refuses to start.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        let mut search_problems = Vec::new();

        if let Some(key) = lookup("TAVILY_API_KEY") {
            builder = builder.search_api_key(key);
        }
        if let Some(n) = search_setting(
            parse_var::<u32>("TAVILY_MAX_RESULTS", lookup("TAVILY_MAX_RESULTS")),
            &mut search_problems,
        ) {
            builder = builder.search_max_results(n);
        }
        if let Some(depth) = search_setting(
            parse_var::<SearchDepth>("TAVILY_SEARCH_DEPTH", lookup("TAVILY_SEARCH_DEPTH")),
            &mut search_problems,
        ) {
            builder = builder.search_depth(depth);
        }
        if let Some(secs) = parse_var::<u64>(
            "FINANCE_REQUEST_TIMEOUT_SECS",
            lookup("FINANCE_REQUEST_TIMEOUT_SECS"),
        )? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = lookup("FINANCE_USER_AGENT") {
            builder = builder.user_agent(agent);
        }

        let mut config = builder.build()?;
        if !search_problems.is_empty() {
            config.search.invalid_setting = Some(search_problems.join("; "));
        }
        Ok(config)
    }

    /// Validate the settings every tool depends on
    ///
    /// Search settings are checked by [`SearchConfig::validate`] when the
    /// search client is built.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(FinanceError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Url::parse(&self.yahoo_base_url).map_err(|e| {
            FinanceError::ConfigError(format!("yahoo_base_url '{}': {e}", self.yahoo_base_url))
        })?;

        Ok(())
    }
}

/// Keep a parsed search setting, or note why it was rejected
fn search_setting<T>(
    parsed: std::result::Result<Option<T>, ConfigError>,
    problems: &mut Vec<String>,
) -> Option<T> {
    parsed.unwrap_or_else(|e| {
        problems.push(e.to_string());
        None
    })
}

/// Builder for FinanceConfig
#[derive(Debug, Default)]
pub struct FinanceConfigBuilder {
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    yahoo_base_url: Option<String>,
    search_api_key: Option<String>,
    search_max_results: Option<u32>,
    search_depth: Option<SearchDepth>,
    search_endpoint: Option<String>,
}

impl FinanceConfigBuilder {
    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the user agent for market data requests
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Point the market data client at a different host
    pub fn yahoo_base_url(mut self, url: impl Into<String>) -> Self {
        self.yahoo_base_url = Some(url.into());
        self
    }

    /// Set the search API key
    pub fn search_api_key(mut self, key: impl Into<String>) -> Self {
        self.search_api_key = Some(key.into());
        self
    }

    /// Set the maximum number of search results
    pub fn search_max_results(mut self, n: u32) -> Self {
        self.search_max_results = Some(n);
        self
    }

    /// Set the search depth
    pub fn search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = Some(depth);
        self
    }

    /// Set the search endpoint
    pub fn search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = Some(endpoint.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FinanceConfig> {
        let defaults = FinanceConfig::default();

        let config = FinanceConfig {
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            yahoo_base_url: self.yahoo_base_url.unwrap_or(defaults.yahoo_base_url),
            search: SearchConfig {
                api_key: self.search_api_key.or(defaults.search.api_key),
                max_results: self.search_max_results.unwrap_or(defaults.search.max_results),
                search_depth: self.search_depth.unwrap_or(defaults.search.search_depth),
                endpoint: self.search_endpoint.unwrap_or(defaults.search.endpoint),
                ..defaults.search
            },
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = FinanceConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.search_depth, SearchDepth::Advanced);
        assert!(config.search.include_answer);
        assert!(!config.search.include_raw_content);
        assert!(!config.search.include_images);
        assert!(config.search.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = FinanceConfig::builder()
            .request_timeout(Duration::from_secs(10))
            .search_api_key("tvly-test")
            .search_max_results(3)
            .search_depth(SearchDepth::Basic)
            .build()
            .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search.api_key.as_deref(), Some("tvly-test"));
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.search_depth, SearchDepth::Basic);
        assert!(config.search.include_answer);
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let result = FinanceConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(FinanceError::ConfigError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_yahoo_url() {
        let result = FinanceConfig::builder().yahoo_base_url("not a url").build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("yahoo_base_url"));
    }

    #[test]
    fn test_search_validation_rejects_zero_results() {
        let config = FinanceConfig::builder().search_max_results(0).build().unwrap();
        assert!(config.validate().is_ok());
        assert!(config.search.validate().is_err());
    }

    #[test]
    fn test_search_validation_rejects_bad_endpoint() {
        let config = FinanceConfig::builder()
            .search_endpoint("not a url")
            .build()
            .unwrap();
        let err = config.search.validate().unwrap_err().to_string();
        assert!(err.contains("search endpoint"));
    }

    #[test]
    fn test_from_lookup() {
        let config = FinanceConfig::from_lookup(lookup_from(&[
            ("TAVILY_API_KEY", "tvly-abc"),
            ("TAVILY_MAX_RESULTS", "8"),
            ("TAVILY_SEARCH_DEPTH", "basic"),
            ("FINANCE_REQUEST_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.search.api_key.as_deref(), Some("tvly-abc"));
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.search_depth, SearchDepth::Basic);
        assert_eq!(config.request_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = FinanceConfig::from_lookup(|_| None).unwrap();
        assert!(config.search.api_key.is_none());
        assert_eq!(config.search.max_results, 5);
    }

    #[test]
    fn test_from_lookup_malformed_value() {
        let err = FinanceConfig::from_lookup(lookup_from(&[(
            "FINANCE_REQUEST_TIMEOUT_SECS",
            "thirty",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("FINANCE_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_from_lookup_malformed_search_values_keep_defaults() {
        let config = FinanceConfig::from_lookup(lookup_from(&[
            ("TAVILY_API_KEY", "tvly-abc"),
            ("TAVILY_MAX_RESULTS", "ten"),
            ("TAVILY_SEARCH_DEPTH", "fast"),
        ]))
        .unwrap();

        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.search_depth, SearchDepth::Advanced);

        let problem = config.search.invalid_setting.as_deref().unwrap();
        assert!(problem.contains("TAVILY_MAX_RESULTS"));
        assert!(problem.contains("TAVILY_SEARCH_DEPTH"));
        assert!(config.search.validate().is_err());
    }

    #[test]
    fn test_from_lookup_zero_search_results_loads() {
        let config = FinanceConfig::from_lookup(lookup_from(&[("TAVILY_MAX_RESULTS", "0")])).unwrap();
        assert_eq!(config.search.max_results, 0);
        assert!(config.search.validate().is_err());
    }
}

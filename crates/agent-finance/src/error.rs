//! Error types for financial data operations

use thiserror::Error;

/// Financial tool specific errors
#[derive(Debug, Error)]
pub enum FinanceError {
    /// Upstream API returned an error or an unexpected payload
    #[error("API error: {0}")]
    ApiError(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// The tool input could not be parsed or failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Too few data points to compute the requested metrics
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Web search provider error
    #[error("Search error: {0}")]
    SearchError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for financial operations
pub type Result<T> = std::result::Result<T, FinanceError>;

impl FinanceError {
    /// Shorthand for an input validation failure
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Convert FinanceError to agent_tools::Error
impl From<FinanceError> for agent_tools::Error {
    fn from(err: FinanceError) -> Self {
        agent_tools::Error::ExecutionFailed(err.to_string())
    }
}

impl From<agent_utils::ConfigError> for FinanceError {
    fn from(err: agent_utils::ConfigError) -> Self {
        FinanceError::ConfigError(err.to_string())
    }
}

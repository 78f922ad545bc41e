//! Error types for investment data operations

use thiserror::Error;

/// Investment data specific errors
#[derive(Debug, Error)]
pub enum InvestError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid ticker symbol provided
    #[error("Invalid ticker: {0}")]
    InvalidTicker(String),

    /// Data not available for the requested ticker
    #[error("No {category} data found for {ticker}. Please verify the ticker symbol.")]
    DataUnavailable { ticker: String, category: String },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Financial data provider error
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Research search backend error
    #[error("Research search error: {0}")]
    SearchError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl InvestError {
    /// Convenience constructor for the not-found case
    pub fn data_unavailable(ticker: impl Into<String>, category: impl Into<String>) -> Self {
        InvestError::DataUnavailable {
            ticker: ticker.into(),
            category: category.into(),
        }
    }
}

/// Result type alias for investment data operations
pub type Result<T> = std::result::Result<T, InvestError>;

/// Convert InvestError to invest_core::Error
impl From<InvestError> for invest_core::Error {
    fn from(err: InvestError) -> Self {
        invest_core::Error::ProcessingFailed(err.to_string())
    }
}

/// Convert invest_core::Error to InvestError
impl From<invest_core::Error> for InvestError {
    fn from(err: invest_core::Error) -> Self {
        InvestError::Other(err.to_string())
    }
}

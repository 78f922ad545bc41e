//! Alpha Vantage API client
//!
//! One fetch category per method: daily price series, company overview, and
//! the three annual financial statements. Each call is a single outbound
//! request with no retries; upstream failures surface as typed errors for
//! the service layer to fold into envelopes.

use crate::config::AgentConfig;
use crate::error::{InvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Key used when no API key was configured; the provider serves a limited
/// set of tickers under it
const DEMO_API_KEY: &str = "demo";

/// One day of price data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Seam over the financial data provider
///
/// The service layer depends on this trait rather than the concrete client
/// so tests can inject stub data sources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the recent daily price series, newest first
    async fn daily_series(&self, ticker: &str) -> Result<Vec<DailyBar>>;

    /// Fetch the company overview payload
    async fn company_overview(&self, ticker: &str) -> Result<Map<String, Value>>;

    /// Fetch the most recent annual income statement report
    async fn income_statement(&self, ticker: &str) -> Result<Map<String, Value>>;

    /// Fetch the most recent annual balance sheet report
    async fn balance_sheet(&self, ticker: &str) -> Result<Map<String, Value>>;

    /// Fetch the most recent annual cash flow report
    async fn cash_flow(&self, ticker: &str) -> Result<Map<String, Value>>;
}

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    /// Create a new client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the process configuration
    ///
    /// Falls back to the provider's demo key when none was configured, which
    /// serves a restricted set of tickers.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: config
                .provider_api_key
                .clone()
                .unwrap_or_else(|| DEMO_API_KEY.to_string()),
        })
    }

    /// Issue one provider query and screen the payload for upstream errors
    async fn query(&self, function: &str, ticker: &str) -> Result<Value> {
        debug!(function, ticker, "querying alpha vantage");

        let params = [
            ("function", function),
            ("symbol", ticker),
            ("outputsize", "compact"),
            ("apikey", &self.api_key),
        ];

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(InvestError::ProviderError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;

        // Check for API error messages
        if let Some(error) = data.get("Error Message") {
            return Err(InvestError::ProviderError(error.to_string()));
        }

        // Both keys signal a throttled or restricted request
        if data.get("Note").is_some() || data.get("Information").is_some() {
            return Err(InvestError::RateLimitExceeded {
                provider: "Alpha Vantage".to_string(),
            });
        }

        Ok(data)
    }

    /// Extract the most recent report from an `annualReports` payload
    fn latest_annual_report(
        data: &Value,
        ticker: &str,
        category: &str,
    ) -> Result<Map<String, Value>> {
        data.get("annualReports")
            .and_then(Value::as_array)
            .and_then(|reports| reports.first())
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| InvestError::data_unavailable(ticker, category))
    }
}

#[async_trait]
impl MarketData for AlphaVantageClient {
    async fn daily_series(&self, ticker: &str) -> Result<Vec<DailyBar>> {
        let data = self.query("TIME_SERIES_DAILY", ticker).await?;

        let series = data
            .get("Time Series (Daily)")
            .and_then(Value::as_object)
            .ok_or_else(|| InvestError::data_unavailable(ticker, "price"))?;

        let mut bars = Vec::with_capacity(series.len());
        for (date, values) in series {
            let field = |key: &str| {
                values
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or("0")
                    .parse::<f64>()
                    .unwrap_or(0.0)
            };

            bars.push(DailyBar {
                date: date.clone(),
                open: field("1. open"),
                high: field("2. high"),
                low: field("3. low"),
                close: field("4. close"),
                volume: values
                    .get("5. volume")
                    .and_then(Value::as_str)
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
            });
        }

        if bars.is_empty() {
            return Err(InvestError::data_unavailable(ticker, "price"));
        }

        // Newest first; the snapshot constructor indexes from the front
        bars.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(bars)
    }

    async fn company_overview(&self, ticker: &str) -> Result<Map<String, Value>> {
        let data = self.query("OVERVIEW", ticker).await?;

        // An unknown symbol comes back as an empty object
        match data.as_object() {
            Some(map) if !map.is_empty() => Ok(map.clone()),
            _ => Err(InvestError::data_unavailable(ticker, "fundamental")),
        }
    }

    async fn income_statement(&self, ticker: &str) -> Result<Map<String, Value>> {
        let data = self.query("INCOME_STATEMENT", ticker).await?;
        Self::latest_annual_report(&data, ticker, "income statement")
    }

    async fn balance_sheet(&self, ticker: &str) -> Result<Map<String, Value>> {
        let data = self.query("BALANCE_SHEET", ticker).await?;
        Self::latest_annual_report(&data, ticker, "balance sheet")
    }

    async fn cash_flow(&self, ticker: &str) -> Result<Map<String, Value>> {
        let data = self.query("CASH_FLOW", ticker).await?;
        Self::latest_annual_report(&data, ticker, "cash flow")
    }
}

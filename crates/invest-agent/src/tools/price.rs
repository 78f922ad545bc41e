//! Tools for price and fundamentals lookups

use super::{TickerParams, decode_params, ticker_schema};
use crate::service::InvestmentService;
use async_trait::async_trait;
use invest_core::Result as CoreResult;
use invest_tools::Tool;
use serde_json::Value;
use std::sync::Arc;

/// Tool for fetching the current price and recent performance
pub struct StockPriceTool {
    service: Arc<InvestmentService>,
}

impl StockPriceTool {
    /// Create a new stock price tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.stock_price(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Get current stock price and recent performance data. \
         Returns current price, day and month changes, recent high/low, and average volume."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for fetching fundamental financial metrics
pub struct StockFundamentalsTool {
    service: Arc<InvestmentService>,
}

impl StockFundamentalsTool {
    /// Create a new fundamentals tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for StockFundamentalsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.stock_fundamentals(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_stock_fundamentals"
    }

    fn description(&self) -> &str {
        "Get fundamental financial metrics for a stock. \
         Includes company information, market cap, P/E ratios, dividend yield, beta, \
         EPS, analyst target, and the 52-week range."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

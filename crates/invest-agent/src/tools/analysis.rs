//! Tools for derived analysis: valuation, ratios, growth

use super::{TickerParams, decode_params, ticker_schema};
use crate::service::InvestmentService;
use async_trait::async_trait;
use invest_core::Result as CoreResult;
use invest_tools::Tool;
use serde_json::Value;
use std::sync::Arc;

/// Tool for key valuation metrics
pub struct ValuationMetricsTool {
    service: Arc<InvestmentService>,
}

impl ValuationMetricsTool {
    /// Create a new valuation metrics tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ValuationMetricsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.valuation_metrics(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "calculate_valuation_metrics"
    }

    fn description(&self) -> &str {
        "Calculate key valuation metrics for a stock: current price, P/E, market cap, \
         EPS, price-to-book, PEG, dividend yield, and analyst target."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for liquidity, profitability, and leverage ratios
pub struct FinancialRatiosTool {
    service: Arc<InvestmentService>,
}

impl FinancialRatiosTool {
    /// Create a new financial ratios tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for FinancialRatiosTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.financial_ratios(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "calculate_financial_ratios"
    }

    fn description(&self) -> &str {
        "Calculate liquidity, profitability, and leverage ratios from the latest \
         annual financial statements. A ratio group that cannot be computed is \
         replaced by an explanatory note."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for growth trend analysis
pub struct GrowthTrendsTool {
    service: Arc<InvestmentService>,
}

impl GrowthTrendsTool {
    /// Create a new growth trends tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GrowthTrendsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.growth_trends(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "analyze_growth_trends"
    }

    fn description(&self) -> &str {
        "Analyze growth posture for a stock: revenue growth, recent price momentum, \
         and growth-oriented valuation metrics (PEG, forward P/E)."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

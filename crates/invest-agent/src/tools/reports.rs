//! Tools for aggregate views: comparison, overview, report, checklist

use super::{TickerParams, decode_params, ticker_schema};
use crate::service::InvestmentService;
use async_trait::async_trait;
use invest_core::Result as CoreResult;
use invest_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool for comparing two stocks side by side
pub struct CompareStocksTool {
    service: Arc<InvestmentService>,
}

#[derive(Debug, Deserialize)]
struct CompareParams {
    ticker1: String,
    ticker2: String,
}

impl CompareStocksTool {
    /// Create a new comparison tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CompareStocksTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: CompareParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.compare(&params.ticker1, &params.ticker2).await)
    }

    fn name(&self) -> &str {
        "compare_stocks"
    }

    fn description(&self) -> &str {
        "Compare two stocks side by side with price data and fundamentals for each. \
         A data failure for one ticker does not block the other."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker1": {
                    "type": "string",
                    "description": "First stock ticker symbol"
                },
                "ticker2": {
                    "type": "string",
                    "description": "Second stock ticker symbol"
                }
            },
            "required": ["ticker1", "ticker2"]
        })
    }
}

/// Tool for a quick single-stock overview
pub struct StockInfoTool {
    service: Arc<InvestmentService>,
}

impl StockInfoTool {
    /// Create a new stock info tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for StockInfoTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.stock_info(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_stock_info"
    }

    fn description(&self) -> &str {
        "Get a quick overview of a stock: latest price information and basic \
         company information in one call."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for the comprehensive investment report
pub struct InvestmentReportTool {
    service: Arc<InvestmentService>,
}

impl InvestmentReportTool {
    /// Create a new report tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for InvestmentReportTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.investment_report(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "generate_investment_report"
    }

    fn description(&self) -> &str {
        "Generate a comprehensive investment research report combining price \
         performance, company overview, the three financial statements, and a \
         valuation analysis under named sections."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for the systematic evaluation checklist
pub struct InvestmentChecklistTool {
    service: Arc<InvestmentService>,
}

impl InvestmentChecklistTool {
    /// Create a new checklist tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for InvestmentChecklistTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.checklist_screen(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "investment_checklist_screen"
    }

    fn description(&self) -> &str {
        "Gather comprehensive financial data for systematic stock evaluation, \
         organized into business quality, financial health, valuation metrics, and \
         risk indicators. Raw data only; no scoring or judgment is applied."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::alpha_vantage::MockMarketData;

    fn test_service() -> Arc<InvestmentService> {
        Arc::new(InvestmentService::new(Arc::new(MockMarketData::new()), None))
    }

    #[test]
    fn test_tool_metadata() {
        let service = test_service();

        let tool = CompareStocksTool::new(service.clone());
        assert_eq!(tool.name(), "compare_stocks");
        let schema = tool.input_schema();
        assert!(schema["properties"]["ticker1"].is_object());
        assert!(schema["properties"]["ticker2"].is_object());

        let tool = StockInfoTool::new(service.clone());
        assert_eq!(tool.name(), "get_stock_info");

        let tool = InvestmentReportTool::new(service.clone());
        assert_eq!(tool.name(), "generate_investment_report");

        let tool = InvestmentChecklistTool::new(service);
        assert_eq!(tool.name(), "investment_checklist_screen");
    }

    #[tokio::test]
    async fn test_compare_requires_both_tickers() {
        let tool = CompareStocksTool::new(test_service());

        let result = tool.execute(json!({ "ticker1": "AAPL" })).await.unwrap();
        assert_eq!(result["status"], "error");
    }
}

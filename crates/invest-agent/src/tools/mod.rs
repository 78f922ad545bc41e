//! Tool facade exposed to the agent runtime
//!
//! One `Tool` impl per public operation, each with a stable name, a
//! description for the LLM, and a JSON input schema. Every failure inside
//! an operation — including undecodable parameters — is converted to an
//! error envelope here; `execute` never returns `Err` for data problems, so
//! no exception crosses into the runtime.

pub mod analysis;
pub mod price;
pub mod reports;
pub mod research;
pub mod statements;

use crate::service::InvestmentService;
use invest_core::envelope;
use invest_tools::ToolRegistry;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

pub use analysis::{FinancialRatiosTool, GrowthTrendsTool, ValuationMetricsTool};
pub use price::{StockFundamentalsTool, StockPriceTool};
pub use reports::{CompareStocksTool, InvestmentChecklistTool, InvestmentReportTool, StockInfoTool};
pub use research::ResearchSearchTool;
pub use statements::{BalanceSheetTool, CashFlowTool, IncomeStatementTool};

/// Decode tool parameters, or produce the error envelope to return as-is
pub(crate) fn decode_params<T: DeserializeOwned>(params: Value) -> Result<T, Value> {
    serde_json::from_value(params)
        .map_err(|e| envelope::error(format!("Invalid parameters: {e}")))
}

/// Input schema shared by every single-ticker tool
pub(crate) fn ticker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ticker": {
                "type": "string",
                "description": "Stock ticker symbol (e.g., 'AAPL', 'MSFT', 'GOOGL')"
            }
        },
        "required": ["ticker"]
    })
}

/// Parameters for single-ticker tools
#[derive(Debug, serde::Deserialize)]
pub(crate) struct TickerParams {
    pub ticker: String,
}

/// Build the registry of all investment research tools
pub fn registry(service: Arc<InvestmentService>) -> ToolRegistry {
    let registry = ToolRegistry::new();

    registry.register(Arc::new(ResearchSearchTool::new(service.clone())));
    registry.register(Arc::new(StockPriceTool::new(service.clone())));
    registry.register(Arc::new(StockFundamentalsTool::new(service.clone())));
    registry.register(Arc::new(CompareStocksTool::new(service.clone())));
    registry.register(Arc::new(StockInfoTool::new(service.clone())));
    registry.register(Arc::new(IncomeStatementTool::new(service.clone())));
    registry.register(Arc::new(BalanceSheetTool::new(service.clone())));
    registry.register(Arc::new(CashFlowTool::new(service.clone())));
    registry.register(Arc::new(ValuationMetricsTool::new(service.clone())));
    registry.register(Arc::new(InvestmentReportTool::new(service.clone())));
    registry.register(Arc::new(FinancialRatiosTool::new(service.clone())));
    registry.register(Arc::new(GrowthTrendsTool::new(service.clone())));
    registry.register(Arc::new(InvestmentChecklistTool::new(service)));

    registry
}

//! Tools for financial statement lookups

use super::{TickerParams, decode_params, ticker_schema};
use crate::service::InvestmentService;
use async_trait::async_trait;
use invest_core::Result as CoreResult;
use invest_tools::Tool;
use serde_json::Value;
use std::sync::Arc;

/// Tool for fetching the latest annual income statement
pub struct IncomeStatementTool {
    service: Arc<InvestmentService>,
}

impl IncomeStatementTool {
    /// Create a new income statement tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for IncomeStatementTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.income_statement(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_income_statement"
    }

    fn description(&self) -> &str {
        "Get the latest annual income statement for a stock: \
         revenue, gross profit, operating income, net income, EBITDA, and R&D spend."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for fetching the latest annual balance sheet
pub struct BalanceSheetTool {
    service: Arc<InvestmentService>,
}

impl BalanceSheetTool {
    /// Create a new balance sheet tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for BalanceSheetTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.balance_sheet(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_balance_sheet"
    }

    fn description(&self) -> &str {
        "Get the latest annual balance sheet for a stock: \
         assets, liabilities, shareholder equity, cash position, and debt levels."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

/// Tool for fetching the latest annual cash flow statement
pub struct CashFlowTool {
    service: Arc<InvestmentService>,
}

impl CashFlowTool {
    /// Create a new cash flow tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CashFlowTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: TickerParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.cash_flow(&params.ticker).await)
    }

    fn name(&self) -> &str {
        "get_cash_flow"
    }

    fn description(&self) -> &str {
        "Get the latest annual cash flow statement for a stock: \
         operating cash flow, capital expenditures, free cash flow, and dividends paid."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

//! Tool for searching curated investment research

use super::decode_params;
use crate::service::InvestmentService;
use async_trait::async_trait;
use invest_core::Result as CoreResult;
use invest_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool for querying the research document data store
pub struct ResearchSearchTool {
    service: Arc<InvestmentService>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

impl ResearchSearchTool {
    /// Create a new research search tool
    pub fn new(service: Arc<InvestmentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ResearchSearchTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: SearchParams = match decode_params(params) {
            Ok(params) => params,
            Err(envelope) => return Ok(envelope),
        };

        Ok(self.service.search_research(&params.query).await)
    }

    fn name(&self) -> &str {
        "search_investment_research"
    }

    fn description(&self) -> &str {
        "Search curated investment research, frameworks, and methodologies from the \
         configured data store. Use this for questions about investment approaches, \
         valuation methods, and best practices. Returns titles, snippets, and links."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query about investment methodology, frameworks, or concepts"
                }
            },
            "required": ["query"]
        })
    }
}

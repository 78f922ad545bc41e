//! Investment research tool layer
//!
//! This crate exposes financial-data lookups and a document-search call as
//! named tools for an LLM agent runtime. Every capability is a passthrough
//! to an external source with light reshaping into a flat record and a
//! uniform `{status, ...}` response envelope:
//!
//! - Price, fundamentals, and financial statement lookups (Alpha Vantage)
//! - Derived ratio groups (liquidity, profitability, leverage)
//! - Aggregate views: comparison, comprehensive report, checklist screen
//! - Curated research document search (optional, disabled when the backend
//!   is not configured)
//!
//! # Example
//!
//! ```rust,ignore
//! use invest_agent::{AgentConfig, InvestmentService, tools};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AgentConfig::from_env()?;
//!     let service = Arc::new(InvestmentService::from_config(&config)?);
//!     let registry = tools::registry(service);
//!
//!     let tool = registry.get("get_stock_price").unwrap();
//!     let result = tool.execute(serde_json::json!({ "ticker": "AAPL" })).await?;
//!     println!("{result}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod search;
pub mod service;
pub mod tools;

// Re-export main types for convenience
pub use config::{AgentConfig, SearchBackendConfig};
pub use error::{InvestError, Result};
pub use service::InvestmentService;

//! External API clients for financial data

pub mod alpha_vantage;

pub use alpha_vantage::{AlphaVantageClient, DailyBar, MarketData};

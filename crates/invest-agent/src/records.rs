//! Normalized, call-scoped data records
//!
//! Upstream payloads arrive as string-typed maps with inconsistent presence.
//! This module flattens them into fixed-shape records whose optional fields
//! use an explicit [`Field`] value with a `NotAvailable` variant, so a
//! missing dividend yield is never misread as a zero one. Records are built
//! fresh per call and never cached.

use crate::api::alpha_vantage::DailyBar;
use crate::error::{InvestError, Result};
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Map, Value};

/// Values treated as "not available" when they arrive as strings
const ABSENT_MARKERS: &[&str] = &["", "None", "N/A", "-", "null"];

/// Wire form of an absent value, kept for compatibility with consumers of
/// the original payload shape
const NOT_AVAILABLE: &str = "N/A";

/// An upstream field value: a number, free text, or explicitly absent
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Number(f64),
    Text(String),
    NotAvailable,
}

impl Field {
    /// Normalize a raw JSON value from an upstream payload
    ///
    /// Numeric strings become numbers; known absence markers and missing
    /// values become `NotAvailable`; everything else is kept as text.
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Field::NotAvailable,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(value) => Field::Number(value),
                None => Field::NotAvailable,
            },
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if ABSENT_MARKERS.contains(&trimmed) {
                    Field::NotAvailable
                } else if let Ok(value) = trimmed.parse::<f64>() {
                    Field::Number(value)
                } else {
                    Field::Text(trimmed.to_string())
                }
            }
            Some(_) => Field::NotAvailable,
        }
    }

    /// Look up `key` in an upstream object and normalize it
    pub fn from_map(map: &Map<String, Value>, key: &str) -> Self {
        Field::from_raw(map.get(key))
    }

    /// Numeric view, `None` when absent or textual
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether a value is present at all
    pub fn is_available(&self) -> bool {
        !matches!(self, Field::NotAvailable)
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Number(value) => serializer.serialize_f64(*value),
            Field::Text(text) => serializer.serialize_str(text),
            Field::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Round a currency or percentage figure to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Current price and recent performance derived from a daily series
#[derive(Debug, Clone, Serialize)]
pub struct PriceSnapshot {
    pub ticker: String,
    pub current_price: f64,
    pub change_1day: f64,
    pub change_1day_percent: f64,
    pub change_1month: f64,
    pub change_1month_percent: f64,
    pub high_recent: f64,
    pub low_recent: f64,
    pub average_volume: u64,
}

impl PriceSnapshot {
    /// Build a snapshot from a daily series ordered newest first
    ///
    /// The 1-day change compares the latest and previous closes; the 1-month
    /// change compares the latest close against the oldest close in the
    /// fetched window.
    pub fn from_series(ticker: &str, bars: &[DailyBar]) -> Result<Self> {
        if bars.len() < 2 {
            return Err(InvestError::data_unavailable(ticker, "price"));
        }

        let latest = bars[0].close;
        let previous = bars[1].close;
        let oldest = bars[bars.len() - 1].close;

        if previous == 0.0 || oldest == 0.0 {
            return Err(InvestError::data_unavailable(ticker, "price"));
        }

        let change_1day = latest - previous;
        let change_1month = latest - oldest;

        let high_recent = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let low_recent = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let total_volume: u64 = bars.iter().map(|b| b.volume).sum();
        let average_volume = total_volume / bars.len() as u64;

        Ok(Self {
            ticker: ticker.to_string(),
            current_price: round2(latest),
            change_1day: round2(change_1day),
            change_1day_percent: round2(change_1day / previous * 100.0),
            change_1month: round2(change_1month),
            change_1month_percent: round2(change_1month / oldest * 100.0),
            high_recent: round2(high_recent),
            low_recent: round2(low_recent),
            average_volume,
        })
    }
}

/// Company identity and headline fundamental figures
#[derive(Debug, Clone, Serialize)]
pub struct Fundamentals {
    pub ticker: String,
    pub company_name: Field,
    pub sector: Field,
    pub industry: Field,
    pub market_cap: Field,
    pub pe_ratio: Field,
    pub forward_pe: Field,
    pub peg_ratio: Field,
    pub price_to_book: Field,
    pub dividend_yield: Field,
    pub beta: Field,
    pub profit_margin: Field,
    pub revenue_growth: Field,
    pub eps: Field,
    pub analyst_target: Field,
    #[serde(rename = "52_week_high")]
    pub week_52_high: Field,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Field,
}

impl Fundamentals {
    /// Normalize a company overview payload
    pub fn from_overview(ticker: &str, raw: &Map<String, Value>) -> Self {
        Self {
            ticker: ticker.to_string(),
            company_name: Field::from_map(raw, "Name"),
            sector: Field::from_map(raw, "Sector"),
            industry: Field::from_map(raw, "Industry"),
            market_cap: Field::from_map(raw, "MarketCapitalization"),
            pe_ratio: Field::from_map(raw, "PERatio"),
            forward_pe: Field::from_map(raw, "ForwardPE"),
            peg_ratio: Field::from_map(raw, "PEGRatio"),
            price_to_book: Field::from_map(raw, "PriceToBookRatio"),
            dividend_yield: Field::from_map(raw, "DividendYield"),
            beta: Field::from_map(raw, "Beta"),
            profit_margin: Field::from_map(raw, "ProfitMargin"),
            revenue_growth: Field::from_map(raw, "QuarterlyRevenueGrowthYOY"),
            eps: Field::from_map(raw, "EPS"),
            analyst_target: Field::from_map(raw, "AnalystTargetPrice"),
            week_52_high: Field::from_map(raw, "52WeekHigh"),
            week_52_low: Field::from_map(raw, "52WeekLow"),
        }
    }
}

/// Most recent annual income statement line items
#[derive(Debug, Clone, Serialize)]
pub struct IncomeStatement {
    pub ticker: String,
    pub fiscal_date: Field,
    pub total_revenue: Field,
    pub gross_profit: Field,
    pub operating_income: Field,
    pub net_income: Field,
    pub ebitda: Field,
    pub eps: Field,
    pub research_development: Field,
}

impl IncomeStatement {
    /// Normalize the most recent annual income statement report
    pub fn from_report(ticker: &str, raw: &Map<String, Value>) -> Self {
        Self {
            ticker: ticker.to_string(),
            fiscal_date: Field::from_map(raw, "fiscalDateEnding"),
            total_revenue: Field::from_map(raw, "totalRevenue"),
            gross_profit: Field::from_map(raw, "grossProfit"),
            operating_income: Field::from_map(raw, "operatingIncome"),
            net_income: Field::from_map(raw, "netIncome"),
            ebitda: Field::from_map(raw, "ebitda"),
            eps: Field::from_map(raw, "eps"),
            research_development: Field::from_map(raw, "researchAndDevelopment"),
        }
    }
}

/// Most recent annual balance sheet line items
#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub ticker: String,
    pub fiscal_date: Field,
    pub total_assets: Field,
    pub total_liabilities: Field,
    pub total_shareholder_equity: Field,
    pub current_assets: Field,
    pub current_liabilities: Field,
    pub cash_and_equivalents: Field,
    pub long_term_debt: Field,
    pub short_term_debt: Field,
}

impl BalanceSheet {
    /// Normalize the most recent annual balance sheet report
    pub fn from_report(ticker: &str, raw: &Map<String, Value>) -> Self {
        Self {
            ticker: ticker.to_string(),
            fiscal_date: Field::from_map(raw, "fiscalDateEnding"),
            total_assets: Field::from_map(raw, "totalAssets"),
            total_liabilities: Field::from_map(raw, "totalLiabilities"),
            total_shareholder_equity: Field::from_map(raw, "totalShareholderEquity"),
            current_assets: Field::from_map(raw, "totalCurrentAssets"),
            current_liabilities: Field::from_map(raw, "totalCurrentLiabilities"),
            cash_and_equivalents: Field::from_map(raw, "cashAndCashEquivalentsAtCarryingValue"),
            long_term_debt: Field::from_map(raw, "longTermDebt"),
            short_term_debt: Field::from_map(raw, "shortTermDebt"),
        }
    }
}

/// Most recent annual cash flow statement line items
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowStatement {
    pub ticker: String,
    pub fiscal_date: Field,
    pub operating_cash_flow: Field,
    pub capital_expenditures: Field,
    pub free_cash_flow: Field,
    pub dividends_paid: Field,
    pub change_in_cash: Field,
}

impl CashFlowStatement {
    /// Normalize the most recent annual cash flow report
    ///
    /// Free cash flow is derived as operating cash flow minus capital
    /// expenditures when both line items are numeric.
    pub fn from_report(ticker: &str, raw: &Map<String, Value>) -> Self {
        let operating_cash_flow = Field::from_map(raw, "operatingCashflow");
        let capital_expenditures = Field::from_map(raw, "capitalExpenditures");

        let free_cash_flow = match (operating_cash_flow.as_f64(), capital_expenditures.as_f64()) {
            (Some(ocf), Some(capex)) => Field::Number(round2(ocf - capex)),
            _ => Field::NotAvailable,
        };

        Self {
            ticker: ticker.to_string(),
            fiscal_date: Field::from_map(raw, "fiscalDateEnding"),
            operating_cash_flow,
            capital_expenditures,
            free_cash_flow,
            dividends_paid: Field::from_map(raw, "dividendPayout"),
            change_in_cash: Field::from_map(raw, "changeInCashAndCashEquivalents"),
        }
    }
}

//! Operation layer: fetch, normalize, and aggregate
//!
//! Every public method here returns exactly one response envelope and never
//! lets an error cross its boundary. Aggregate operations issue their
//! constituent fetches sequentially and embed a failed section as that
//! section's own error envelope; the single hard-abort case is a failed
//! fundamentals fetch, which blocks report, checklist, and growth analysis
//! as a whole.

use crate::api::{AlphaVantageClient, MarketData};
use crate::config::AgentConfig;
use crate::error::{InvestError, Result};
use crate::metrics;
use crate::records::{
    BalanceSheet, CashFlowStatement, Fundamentals, IncomeStatement, PriceSnapshot,
};
use crate::search::{ResearchSearch, ResearchSearchClient};
use invest_core::envelope;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

/// Message returned when the search backend was never configured
const SEARCH_UNAVAILABLE_MESSAGE: &str = "Research search is not available. \
     The agent will continue without research context grounding. \
     Configure the search backend to enable this feature.";

/// Investment research operations over injected data sources
pub struct InvestmentService {
    market: Arc<dyn MarketData>,
    research: Option<Arc<dyn ResearchSearch>>,
}

impl InvestmentService {
    /// Create a service over explicit data sources
    pub fn new(market: Arc<dyn MarketData>, research: Option<Arc<dyn ResearchSearch>>) -> Self {
        Self { market, research }
    }

    /// Create a service from the process configuration
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let market = AlphaVantageClient::from_config(config)?;
        let research = config
            .search_backend
            .clone()
            .map(|backend| Arc::new(ResearchSearchClient::new(backend)) as Arc<dyn ResearchSearch>);

        Ok(Self::new(Arc::new(market), research))
    }

    /// Whether the research search capability is enabled
    pub fn research_enabled(&self) -> bool {
        self.research.is_some()
    }

    // ---- single-source operations -------------------------------------

    /// Current price and recent performance for one ticker
    pub async fn stock_price(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };
        record_envelope(&self.fetch_price(&ticker).await)
    }

    /// Company identity and headline fundamentals for one ticker
    pub async fn stock_fundamentals(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };
        record_envelope(&self.fetch_fundamentals(&ticker).await)
    }

    /// Most recent annual income statement for one ticker
    pub async fn income_statement(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };
        record_envelope(&self.fetch_income(&ticker).await)
    }

    /// Most recent annual balance sheet for one ticker
    pub async fn balance_sheet(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };
        record_envelope(&self.fetch_balance(&ticker).await)
    }

    /// Most recent annual cash flow statement for one ticker
    pub async fn cash_flow(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };
        record_envelope(&self.fetch_cash_flow(&ticker).await)
    }

    /// Search the curated research data store
    ///
    /// Returns an info envelope, without any network call, when the backend
    /// was never configured; an empty hit list is a success, not an error.
    pub async fn search_research(&self, query: &str) -> Value {
        let Some(research) = &self.research else {
            return envelope::info(SEARCH_UNAVAILABLE_MESSAGE);
        };

        match research.search(query).await {
            Ok(hits) if hits.is_empty() => envelope::success(json!({
                "query": query,
                "message": "No results found for this query.",
                "results": [],
            })),
            Ok(hits) => envelope::success(json!({
                "query": query,
                "results_count": hits.len(),
                "results": hits,
            })),
            Err(err) => {
                warn!(query, error = %err, "research search failed");
                envelope::error(format!("Error searching investment research: {err}"))
            }
        }
    }

    // ---- derived operations -------------------------------------------

    /// Valuation figures juxtaposed from price and fundamentals
    ///
    /// Blocked as a whole when either upstream fetch fails.
    pub async fn valuation_metrics(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let price = self.fetch_price(&ticker).await;
        let fundamentals = self.fetch_fundamentals(&ticker).await;

        match (price, fundamentals) {
            (Ok(price), Ok(fundamentals)) => {
                let mut payload = json!({ "ticker": ticker });
                merge(&mut payload, metrics::valuation_summary(&price, &fundamentals));
                envelope::success(payload)
            }
            _ => envelope::error(
                "Unable to calculate metrics - fundamental or price data unavailable",
            ),
        }
    }

    /// Liquidity, profitability, and leverage ratio groups
    ///
    /// Blocked as a whole when either financial statement fetch fails; a
    /// group that cannot be computed from the fetched statements is replaced
    /// by a note, never partially filled.
    pub async fn financial_ratios(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let balance = self.fetch_balance(&ticker).await;
        let income = self.fetch_income(&ticker).await;

        match (balance, income) {
            (Ok(balance), Ok(income)) => envelope::success(json!({
                "ticker": ticker,
                "liquidity_ratios": metrics::liquidity_ratios(&balance),
                "profitability_ratios": metrics::profitability_ratios(&income),
                "leverage_ratios": metrics::leverage_ratios(&balance),
            })),
            _ => envelope::error(
                "Unable to calculate ratios - financial statement data unavailable",
            ),
        }
    }

    /// Growth posture: revenue growth, price momentum, growth valuation
    ///
    /// Aborts only when fundamentals are unavailable; missing price data
    /// degrades the momentum fields to the absent sentinel.
    pub async fn growth_trends(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let fundamentals = match self.fetch_fundamentals(&ticker).await {
            Ok(fundamentals) => fundamentals,
            Err(_) => {
                return envelope::error("Unable to analyze growth - fundamental data unavailable");
            }
        };
        let price = self.fetch_price(&ticker).await;

        let (day_change, month_change) = match &price {
            Ok(price) => (
                json!(price.change_1day_percent),
                json!(price.change_1month_percent),
            ),
            Err(_) => (json!("N/A"), json!("N/A")),
        };

        envelope::success(json!({
            "ticker": ticker,
            "revenue_growth": fundamentals.revenue_growth,
            "price_momentum": {
                "1_day_change": day_change,
                "1_month_change": month_change,
            },
            "valuation_metrics": {
                "peg_ratio": fundamentals.peg_ratio,
                "forward_pe": fundamentals.forward_pe,
            },
        }))
    }

    // ---- aggregate operations -----------------------------------------

    /// Side-by-side price and fundamentals for two tickers
    ///
    /// Each ticker's envelopes are fetched and embedded independently; a
    /// failure for one never blocks the other.
    pub async fn compare(&self, ticker1: &str, ticker2: &str) -> Value {
        let (Ok(ticker1), Ok(ticker2)) = (normalize_ticker(ticker1), normalize_ticker(ticker2))
        else {
            return empty_ticker_envelope();
        };

        let mut comparison = serde_json::Map::new();
        for ticker in [&ticker1, &ticker2] {
            let price_data = self.stock_price(ticker).await;
            let fundamentals = self.stock_fundamentals(ticker).await;
            comparison.insert(
                ticker.clone(),
                json!({ "price_data": price_data, "fundamentals": fundamentals }),
            );
        }

        envelope::success(json!({ "comparison": comparison }))
    }

    /// Quick overview: price envelope plus company envelope
    pub async fn stock_info(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let price_info = self.stock_price(&ticker).await;
        let company_info = self.stock_fundamentals(&ticker).await;

        envelope::success(json!({
            "ticker": ticker,
            "price_info": price_info,
            "company_info": company_info,
        }))
    }

    /// Comprehensive report combining every section under fixed keys
    pub async fn investment_report(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let fundamentals = match self.fetch_fundamentals(&ticker).await {
            Ok(fundamentals) => fundamentals,
            Err(_) => {
                return envelope::error(
                    "Unable to generate report - fundamental data unavailable",
                );
            }
        };

        let price = self.fetch_price(&ticker).await;
        let income = self.income_statement(&ticker).await;
        let balance = self.balance_sheet(&ticker).await;
        let cash_flow = self.cash_flow(&ticker).await;

        let valuation_analysis = match &price {
            Ok(price) => {
                let mut payload = json!({ "ticker": ticker.clone() });
                merge(&mut payload, metrics::valuation_summary(price, &fundamentals));
                envelope::success(payload)
            }
            Err(_) => envelope::error(
                "Unable to calculate metrics - fundamental or price data unavailable",
            ),
        };

        envelope::success(json!({
            "ticker": ticker,
            "report_date": "Current",
            "sections": {
                "price_performance": record_envelope(&price),
                "company_overview": envelope::success(json!(fundamentals)),
                "income_statement": income,
                "balance_sheet": balance,
                "cash_flow": cash_flow,
                "valuation_analysis": valuation_analysis,
            },
            "report_type": "Comprehensive Investment Research Report",
            "note": "This automated report provides real-time financial data and analysis.",
        }))
    }

    /// Checklist screen: raw figures regrouped into four fixed categories
    ///
    /// Pure re-keying of already-fetched data; no scoring or judgment.
    pub async fn checklist_screen(&self, ticker: &str) -> Value {
        let Ok(ticker) = normalize_ticker(ticker) else {
            return empty_ticker_envelope();
        };

        let fundamentals = match self.fetch_fundamentals(&ticker).await {
            Ok(fundamentals) => fundamentals,
            Err(_) => {
                return envelope::error(
                    "Unable to complete checklist - fundamental data unavailable",
                );
            }
        };

        let balance = self.fetch_balance(&ticker).await;
        let income = self.fetch_income(&ticker).await;
        let cash_flow = self.fetch_cash_flow(&ticker).await;

        let profitability = income.as_ref().ok().map(metrics::profitability_ratios);
        let (liquidity, leverage) = match balance.as_ref() {
            Ok(balance) => (
                Some(metrics::liquidity_ratios(balance)),
                Some(metrics::leverage_ratios(balance)),
            ),
            Err(_) => (None, None),
        };

        let cash_field = |pick: fn(&CashFlowStatement) -> &crate::records::Field| match &cash_flow
        {
            Ok(statement) => json!(pick(statement)),
            Err(_) => json!("N/A"),
        };

        envelope::success(json!({
            "ticker": ticker,
            "company_name": fundamentals.company_name,
            "business_quality": {
                "net_profit_margin": group_value(profitability.as_ref(), "net_profit_margin"),
                "gross_profit_margin": group_value(profitability.as_ref(), "gross_profit_margin"),
                "operating_margin": group_value(profitability.as_ref(), "operating_margin"),
                "market_cap": fundamentals.market_cap,
                "sector": fundamentals.sector,
                "industry": fundamentals.industry,
            },
            "financial_health": {
                "debt_to_equity": group_value(leverage.as_ref(), "debt_to_equity"),
                "debt_to_assets": group_value(leverage.as_ref(), "debt_to_assets"),
                "equity_multiplier": group_value(leverage.as_ref(), "equity_multiplier"),
                "current_ratio": group_value(liquidity.as_ref(), "current_ratio"),
                "quick_ratio": group_value(liquidity.as_ref(), "quick_ratio"),
                "cash_ratio": group_value(liquidity.as_ref(), "cash_ratio"),
                "operating_cash_flow": cash_field(|s| &s.operating_cash_flow),
                "free_cash_flow": cash_field(|s| &s.free_cash_flow),
                "capital_expenditures": cash_field(|s| &s.capital_expenditures),
            },
            "valuation_metrics": {
                "peg_ratio": fundamentals.peg_ratio,
                "pe_ratio": fundamentals.pe_ratio,
                "forward_pe": fundamentals.forward_pe,
                "price_to_book": fundamentals.price_to_book,
                "analyst_target": fundamentals.analyst_target,
                "52_week_high": fundamentals.week_52_high,
                "52_week_low": fundamentals.week_52_low,
            },
            "risk_indicators": {
                "beta": fundamentals.beta,
                "dividend_yield": fundamentals.dividend_yield,
                "revenue_growth_yoy": fundamentals.revenue_growth,
                "earnings_per_share": fundamentals.eps,
            },
        }))
    }

    // ---- typed fetch helpers ------------------------------------------

    async fn fetch_price(&self, ticker: &str) -> Result<PriceSnapshot> {
        let bars = self.market.daily_series(ticker).await?;
        PriceSnapshot::from_series(ticker, &bars)
    }

    async fn fetch_fundamentals(&self, ticker: &str) -> Result<Fundamentals> {
        let raw = self.market.company_overview(ticker).await?;
        Ok(Fundamentals::from_overview(ticker, &raw))
    }

    async fn fetch_income(&self, ticker: &str) -> Result<IncomeStatement> {
        let raw = self.market.income_statement(ticker).await?;
        Ok(IncomeStatement::from_report(ticker, &raw))
    }

    async fn fetch_balance(&self, ticker: &str) -> Result<BalanceSheet> {
        let raw = self.market.balance_sheet(ticker).await?;
        Ok(BalanceSheet::from_report(ticker, &raw))
    }

    async fn fetch_cash_flow(&self, ticker: &str) -> Result<CashFlowStatement> {
        let raw = self.market.cash_flow(ticker).await?;
        Ok(CashFlowStatement::from_report(ticker, &raw))
    }
}

/// Uppercase a ticker, rejecting empty input
fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(InvestError::InvalidTicker("empty ticker".to_string()));
    }
    Ok(ticker)
}

fn empty_ticker_envelope() -> Value {
    envelope::error("Ticker symbol must be a non-empty string")
}

/// Fold a typed fetch result into a success or error envelope
fn record_envelope<T: Serialize>(result: &Result<T>) -> Value {
    match result {
        Ok(record) => envelope::success(json!(record)),
        Err(err) => envelope::error(err.to_string()),
    }
}

/// Merge the fields of `extra` (an object) into `target` (an object)
fn merge(target: &mut Value, extra: Value) {
    if let (Some(target), Value::Object(extra)) = (target.as_object_mut(), extra) {
        target.extend(extra);
    }
}

/// Look up a ratio inside a computed group, absent sentinel otherwise
fn group_value(group: Option<&Value>, key: &str) -> Value {
    group
        .and_then(|g| g.get(key))
        .cloned()
        .unwrap_or_else(|| json!("N/A"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::alpha_vantage::{DailyBar, MockMarketData};
    use crate::search::{MockResearchSearch, SearchHit};
    use invest_core::envelope::{Status, status_of};
    use serde_json::Map;

    fn bars() -> Vec<DailyBar> {
        // closes newest first: 110, 100, 90
        [(110.0, 112.0, 108.0), (100.0, 101.0, 99.0), (90.0, 95.0, 88.0)]
            .iter()
            .enumerate()
            .map(|(i, (close, high, low))| DailyBar {
                date: format!("2025-01-0{}", 3 - i),
                open: *close,
                high: *high,
                low: *low,
                close: *close,
                volume: 1_000,
            })
            .collect()
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn overview() -> Map<String, Value> {
        object(json!({
            "Name": "Apple Inc",
            "Sector": "TECHNOLOGY",
            "Industry": "Consumer Electronics",
            "MarketCapitalization": "2900000000000",
            "PERatio": "28.5",
            "ForwardPE": "26.1",
            "PEGRatio": "2.1",
            "PriceToBookRatio": "45.2",
            "DividendYield": "0.0055",
            "Beta": "1.25",
            "ProfitMargin": "0.25",
            "QuarterlyRevenueGrowthYOY": "0.08",
            "EPS": "6.57",
            "AnalystTargetPrice": "200.5",
            "52WeekHigh": "199.62",
            "52WeekLow": "164.08"
        }))
    }

    fn balance_report() -> Map<String, Value> {
        object(json!({
            "fiscalDateEnding": "2024-09-30",
            "totalAssets": "1000",
            "totalLiabilities": "600",
            "totalShareholderEquity": "400",
            "totalCurrentAssets": "500",
            "totalCurrentLiabilities": "250",
            "cashAndCashEquivalentsAtCarryingValue": "100",
            "longTermDebt": "300",
            "shortTermDebt": "50"
        }))
    }

    fn income_report() -> Map<String, Value> {
        object(json!({
            "fiscalDateEnding": "2024-09-30",
            "totalRevenue": "1000",
            "grossProfit": "400",
            "operatingIncome": "150",
            "netIncome": "100",
            "ebitda": "180"
        }))
    }

    fn cash_flow_report() -> Map<String, Value> {
        object(json!({
            "fiscalDateEnding": "2024-09-30",
            "operatingCashflow": "110000",
            "capitalExpenditures": "10000",
            "dividendPayout": "15000",
            "changeInCashAndCashEquivalents": "5000"
        }))
    }

    /// Mock serving the full dataset for every ticker
    fn full_mock() -> MockMarketData {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series().returning(|_| Ok(bars()));
        mock.expect_company_overview().returning(|_| Ok(overview()));
        mock.expect_income_statement().returning(|_| Ok(income_report()));
        mock.expect_balance_sheet().returning(|_| Ok(balance_report()));
        mock.expect_cash_flow().returning(|_| Ok(cash_flow_report()));
        mock
    }

    fn service(mock: MockMarketData) -> InvestmentService {
        InvestmentService::new(Arc::new(mock), None)
    }

    #[tokio::test]
    async fn test_stock_price_normalizes_and_computes_changes() {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series()
            .withf(|ticker| ticker == "AAPL")
            .returning(|_| Ok(bars()));
        let service = service(mock);

        // lowercase input is uppercased before the fetch and in the output
        let env = service.stock_price("aapl").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["ticker"], "AAPL");
        assert_eq!(env["current_price"], 110.0);
        assert_eq!(env["change_1day"], 10.0);
        assert_eq!(env["change_1day_percent"], 10.0);
        assert_eq!(env["change_1month"], 20.0);
        assert_eq!(env["change_1month_percent"], 22.22);
        assert_eq!(env["high_recent"], 112.0);
        assert_eq!(env["low_recent"], 88.0);
        assert_eq!(env["average_volume"], 1000);
    }

    #[tokio::test]
    async fn test_empty_ticker_is_an_error_envelope() {
        let service = service(MockMarketData::new());
        let env = service.stock_price("   ").await;
        assert_eq!(status_of(&env), Some(Status::Error));
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_error_envelope() {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series()
            .returning(|t| Err(InvestError::data_unavailable(t, "price")));
        let service = service(mock);

        let env = service.stock_price("XXXX").await;
        assert_eq!(status_of(&env), Some(Status::Error));
        assert!(
            env["message"]
                .as_str()
                .unwrap()
                .contains("No price data found for XXXX")
        );
    }

    #[tokio::test]
    async fn test_fundamentals_sentinel_fields() {
        let mut mock = MockMarketData::new();
        mock.expect_company_overview()
            .returning(|_| Ok(object(json!({ "Name": "Apple Inc", "DividendYield": "None" }))));
        let service = service(mock);

        let env = service.stock_fundamentals("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["company_name"], "Apple Inc");
        assert_eq!(env["dividend_yield"], "N/A");
        assert_eq!(env["pe_ratio"], "N/A");
    }

    #[tokio::test]
    async fn test_compare_keeps_working_side_on_partial_failure() {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series().returning(|ticker| {
            if ticker == "MSFT" {
                Err(InvestError::data_unavailable(ticker, "price"))
            } else {
                Ok(bars())
            }
        });
        mock.expect_company_overview().returning(|_| Ok(overview()));
        let service = service(mock);

        let env = service.compare("aapl", "msft").await;
        assert_eq!(status_of(&env), Some(Status::Success));

        let comparison = &env["comparison"];
        // keys are uppercased regardless of input casing
        assert!(comparison.get("AAPL").is_some());
        assert!(comparison.get("MSFT").is_some());

        assert_eq!(comparison["AAPL"]["price_data"]["status"], "success");
        assert_eq!(comparison["AAPL"]["price_data"]["current_price"], 110.0);
        assert_eq!(comparison["MSFT"]["price_data"]["status"], "error");
        assert_eq!(comparison["MSFT"]["fundamentals"]["status"], "success");
    }

    #[tokio::test]
    async fn test_stock_info_embeds_both_envelopes() {
        let service = service(full_mock());

        let env = service.stock_info("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["ticker"], "AAPL");
        assert_eq!(env["price_info"]["status"], "success");
        assert_eq!(env["company_info"]["company_name"], "Apple Inc");
    }

    #[tokio::test]
    async fn test_valuation_metrics_juxtaposes_fetched_fields() {
        let service = service(full_mock());

        let env = service.valuation_metrics("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["current_price"], 110.0);
        assert_eq!(env["pe_ratio"], 28.5);
        assert_eq!(env["earnings_per_share"], 6.57);
        assert_eq!(env["analyst_target"], 200.5);
    }

    #[tokio::test]
    async fn test_valuation_metrics_blocked_by_price_failure() {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series()
            .returning(|t| Err(InvestError::data_unavailable(t, "price")));
        mock.expect_company_overview().returning(|_| Ok(overview()));
        let service = service(mock);

        let env = service.valuation_metrics("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Error));
        assert!(env["message"].as_str().unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_financial_ratios_groups() {
        let service = service(full_mock());

        let env = service.financial_ratios("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["liquidity_ratios"]["current_ratio"], 2.0);
        assert_eq!(env["liquidity_ratios"]["quick_ratio"], 1.6);
        assert_eq!(env["liquidity_ratios"]["cash_ratio"], 0.4);
        assert_eq!(env["profitability_ratios"]["net_profit_margin"], 10.0);
        assert_eq!(env["leverage_ratios"]["debt_to_equity"], 1.5);
    }

    #[tokio::test]
    async fn test_financial_ratios_blocked_by_statement_failure() {
        let mut mock = MockMarketData::new();
        mock.expect_balance_sheet()
            .returning(|t| Err(InvestError::data_unavailable(t, "balance sheet")));
        mock.expect_income_statement().returning(|_| Ok(income_report()));
        let service = service(mock);

        let env = service.financial_ratios("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Error));
    }

    #[tokio::test]
    async fn test_growth_trends_shape() {
        let service = service(full_mock());

        let env = service.growth_trends("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["revenue_growth"], 0.08);
        assert_eq!(env["price_momentum"]["1_day_change"], 10.0);
        assert_eq!(env["price_momentum"]["1_month_change"], 22.22);
        assert_eq!(env["valuation_metrics"]["peg_ratio"], 2.1);
        assert_eq!(env["valuation_metrics"]["forward_pe"], 26.1);
    }

    #[tokio::test]
    async fn test_growth_trends_degrades_momentum_without_price() {
        let mut mock = MockMarketData::new();
        mock.expect_company_overview().returning(|_| Ok(overview()));
        mock.expect_daily_series()
            .returning(|t| Err(InvestError::data_unavailable(t, "price")));
        let service = service(mock);

        let env = service.growth_trends("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["price_momentum"]["1_day_change"], "N/A");
    }

    #[tokio::test]
    async fn test_report_embeds_section_errors() {
        let mut mock = MockMarketData::new();
        mock.expect_daily_series().returning(|_| Ok(bars()));
        mock.expect_company_overview().returning(|_| Ok(overview()));
        mock.expect_income_statement()
            .returning(|t| Err(InvestError::data_unavailable(t, "income statement")));
        mock.expect_balance_sheet().returning(|_| Ok(balance_report()));
        mock.expect_cash_flow().returning(|_| Ok(cash_flow_report()));
        let service = service(mock);

        let env = service.investment_report("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["report_type"], "Comprehensive Investment Research Report");

        let sections = &env["sections"];
        assert_eq!(sections["price_performance"]["status"], "success");
        assert_eq!(sections["company_overview"]["status"], "success");
        // failed section embedded as its own error envelope
        assert_eq!(sections["income_statement"]["status"], "error");
        assert_eq!(sections["balance_sheet"]["status"], "success");
        assert_eq!(sections["cash_flow"]["status"], "success");
        assert_eq!(sections["valuation_analysis"]["status"], "success");
    }

    #[tokio::test]
    async fn test_report_aborts_without_fundamentals() {
        let mut mock = MockMarketData::new();
        mock.expect_company_overview()
            .returning(|t| Err(InvestError::data_unavailable(t, "fundamental")));
        let service = service(mock);

        let env = service.investment_report("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Error));
    }

    #[tokio::test]
    async fn test_checklist_regroups_fields() {
        let service = service(full_mock());

        let env = service.checklist_screen("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["company_name"], "Apple Inc");

        assert_eq!(env["business_quality"]["net_profit_margin"], 10.0);
        assert_eq!(env["business_quality"]["sector"], "TECHNOLOGY");
        assert_eq!(env["financial_health"]["current_ratio"], 2.0);
        assert_eq!(env["financial_health"]["debt_to_equity"], 1.5);
        assert_eq!(env["financial_health"]["free_cash_flow"], 100000.0);
        assert_eq!(env["valuation_metrics"]["pe_ratio"], 28.5);
        assert_eq!(env["valuation_metrics"]["52_week_high"], 199.62);
        assert_eq!(env["risk_indicators"]["beta"], 1.25);
        assert_eq!(env["risk_indicators"]["revenue_growth_yoy"], 0.08);
    }

    #[tokio::test]
    async fn test_checklist_degrades_missing_statements_to_sentinels() {
        let mut mock = MockMarketData::new();
        mock.expect_company_overview().returning(|_| Ok(overview()));
        mock.expect_balance_sheet()
            .returning(|t| Err(InvestError::data_unavailable(t, "balance sheet")));
        mock.expect_income_statement()
            .returning(|t| Err(InvestError::data_unavailable(t, "income statement")));
        mock.expect_cash_flow()
            .returning(|t| Err(InvestError::data_unavailable(t, "cash flow")));
        let service = service(mock);

        let env = service.checklist_screen("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["business_quality"]["net_profit_margin"], "N/A");
        assert_eq!(env["financial_health"]["current_ratio"], "N/A");
        assert_eq!(env["financial_health"]["operating_cash_flow"], "N/A");
        // fundamentals-backed categories are unaffected
        assert_eq!(env["valuation_metrics"]["pe_ratio"], 28.5);
    }

    #[tokio::test]
    async fn test_checklist_aborts_without_fundamentals() {
        let mut mock = MockMarketData::new();
        mock.expect_company_overview()
            .returning(|t| Err(InvestError::data_unavailable(t, "fundamental")));
        let service = service(mock);

        let env = service.checklist_screen("AAPL").await;
        assert_eq!(status_of(&env), Some(Status::Error));
    }

    fn service_with_search(search: MockResearchSearch) -> InvestmentService {
        InvestmentService::new(Arc::new(MockMarketData::new()), Some(Arc::new(search)))
    }

    #[tokio::test]
    async fn test_search_zero_hits_is_success_with_message() {
        let mut search = MockResearchSearch::new();
        search.expect_search().returning(|_| Ok(Vec::new()));
        let service = service_with_search(search);

        let env = service.search_research("moat analysis").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["message"], "No results found for this query.");
        assert_eq!(env["results"], json!([]));
    }

    #[tokio::test]
    async fn test_search_hits_carry_query_and_count() {
        let mut search = MockResearchSearch::new();
        search.expect_search().returning(|_| {
            Ok(vec![SearchHit {
                title: "Moat Analysis Primer".to_string(),
                snippet: "A moat is a durable competitive advantage...".to_string(),
                link: "gs://research/moat.pdf".to_string(),
            }])
        });
        let service = service_with_search(search);

        let env = service.search_research("moat analysis").await;
        assert_eq!(status_of(&env), Some(Status::Success));
        assert_eq!(env["query"], "moat analysis");
        assert_eq!(env["results_count"], 1);
        assert_eq!(env["results"][0]["title"], "Moat Analysis Primer");
    }

    #[tokio::test]
    async fn test_search_transport_failure_becomes_error_envelope() {
        let mut search = MockResearchSearch::new();
        search
            .expect_search()
            .returning(|_| Err(InvestError::SearchError("HTTP error: 403 Forbidden".to_string())));
        let service = service_with_search(search);

        let env = service.search_research("moat analysis").await;
        assert_eq!(status_of(&env), Some(Status::Error));
        let message = env["message"].as_str().unwrap();
        assert!(message.contains("Error searching investment research"));
        assert!(message.contains("403 Forbidden"));
    }

    #[tokio::test]
    async fn test_search_unconfigured_returns_info_without_calls() {
        // A service with no research client has nothing to call; the gate
        // answers before any network activity
        let service = service(MockMarketData::new());

        let env = service.search_research("moat analysis").await;
        assert_eq!(status_of(&env), Some(Status::Info));
        assert!(env["message"].as_str().unwrap().contains("not available"));
    }

    #[tokio::test]
    async fn test_statement_envelopes_carry_fiscal_date() {
        let service = service(full_mock());

        let env = service.income_statement("AAPL").await;
        assert_eq!(env["fiscal_date"], "2024-09-30");
        assert_eq!(env["total_revenue"], 1000.0);

        let env = service.balance_sheet("AAPL").await;
        assert_eq!(env["total_shareholder_equity"], 400.0);

        let env = service.cash_flow("AAPL").await;
        assert_eq!(env["free_cash_flow"], 100000.0);
        assert_eq!(env["dividends_paid"], 15000.0);
    }
}

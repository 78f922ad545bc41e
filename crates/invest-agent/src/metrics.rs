//! Derived financial metrics
//!
//! Pure, synchronous calculations over already-normalized records; nothing
//! here performs I/O. Each ratio group is all-or-nothing: it is computed
//! only when every field it reads is numeric and its gating denominator is
//! valid, otherwise the whole group is replaced by a single explanatory
//! note. Partially filled groups with silent zeros are never produced.

use crate::records::{BalanceSheet, Fundamentals, IncomeStatement, PriceSnapshot, round2};
use serde_json::{Value, json};

/// Note substituted for a ratio group that cannot be computed
pub const INSUFFICIENT_DATA_NOTE: &str = "Insufficient data for calculation";

fn insufficient_data() -> Value {
    json!({ "note": INSUFFICIENT_DATA_NOTE })
}

/// Liquidity ratio group: current, quick, and cash ratios
///
/// Requires current assets, current liabilities, and cash to all be numeric
/// and current liabilities to be positive.
pub fn liquidity_ratios(balance: &BalanceSheet) -> Value {
    let inputs = (
        balance.current_assets.as_f64(),
        balance.current_liabilities.as_f64(),
        balance.cash_and_equivalents.as_f64(),
    );

    match inputs {
        (Some(current_assets), Some(current_liabilities), Some(cash))
            if current_liabilities > 0.0 =>
        {
            json!({
                "current_ratio": round2(current_assets / current_liabilities),
                "quick_ratio": round2((current_assets - cash) / current_liabilities),
                "cash_ratio": round2(cash / current_liabilities),
            })
        }
        _ => insufficient_data(),
    }
}

/// Profitability ratio group: net, gross, and operating margins in percent
///
/// Requires revenue and all three income figures to be numeric and revenue
/// to be positive.
pub fn profitability_ratios(income: &IncomeStatement) -> Value {
    let inputs = (
        income.total_revenue.as_f64(),
        income.net_income.as_f64(),
        income.gross_profit.as_f64(),
        income.operating_income.as_f64(),
    );

    match inputs {
        (Some(revenue), Some(net_income), Some(gross_profit), Some(operating_income))
            if revenue > 0.0 =>
        {
            json!({
                "net_profit_margin": round2(net_income / revenue * 100.0),
                "gross_profit_margin": round2(gross_profit / revenue * 100.0),
                "operating_margin": round2(operating_income / revenue * 100.0),
            })
        }
        _ => insufficient_data(),
    }
}

/// Leverage ratio group: debt-to-assets, debt-to-equity, equity multiplier
///
/// Each sub-metric is guarded by its own denominator, but a non-numeric
/// operand or no computable sub-metric collapses the group to the note.
pub fn leverage_ratios(balance: &BalanceSheet) -> Value {
    let inputs = (
        balance.total_assets.as_f64(),
        balance.total_liabilities.as_f64(),
        balance.total_shareholder_equity.as_f64(),
    );

    let (Some(total_assets), Some(total_liabilities), Some(equity)) = inputs else {
        return insufficient_data();
    };

    let mut group = serde_json::Map::new();
    if total_assets > 0.0 {
        group.insert(
            "debt_to_assets".to_string(),
            json!(round2(total_liabilities / total_assets)),
        );
    }
    if equity > 0.0 {
        group.insert(
            "debt_to_equity".to_string(),
            json!(round2(total_liabilities / equity)),
        );
        group.insert(
            "equity_multiplier".to_string(),
            json!(round2(total_assets / equity)),
        );
    }

    if group.is_empty() {
        insufficient_data()
    } else {
        Value::Object(group)
    }
}

/// Valuation summary: juxtaposition of already-fetched price and
/// fundamentals figures, no new computation
pub fn valuation_summary(price: &PriceSnapshot, fundamentals: &Fundamentals) -> Value {
    json!({
        "current_price": price.current_price,
        "pe_ratio": fundamentals.pe_ratio,
        "market_cap": fundamentals.market_cap,
        "earnings_per_share": fundamentals.eps,
        "price_to_book": fundamentals.price_to_book,
        "peg_ratio": fundamentals.peg_ratio,
        "dividend_yield": fundamentals.dividend_yield,
        "analyst_target": fundamentals.analyst_target,
    })
}

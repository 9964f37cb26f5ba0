//! Financial ratio calculation.
//!
//! Ratios are computed from a current statement and, optionally, the statement
//! of the preceding period. Balance-sheet stocks that are set against a flow
//! (inventory against cost of sales, assets against profit) use the two-point
//! average of the opening and closing balance when the previous statement is
//! available.
//!
//! A ratio whose denominator is zero is `None`. No ratio is ever `NaN` or
//! infinite.

use crate::normalize::{NormalizedStatement, normalize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Days in the year used by the turnover-period metrics.
pub const DAYS_IN_YEAR: f64 = 365.0;

/// Divide, returning `None` when the denominator is zero.
///
/// A quotient that overflows to infinity is also `None`.
pub fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|q| q.is_finite())
}

/// Two-point average of a balance; the current value alone without a previous one.
pub fn average(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(previous) => (current + previous) / 2.0,
        None => current,
    }
}

/// Operating financial cycle components, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OfcMetrics {
    /// Inventory period (days inventory is held).
    pub poi: Option<f64>,
    /// Receivables collection period.
    pub ppd: Option<f64>,
    /// Payables payment period.
    pub ppa: Option<f64>,
    /// Operating financial cycle: `poi + ppd - ppa`.
    pub ofc: Option<f64>,
}

/// Liquidity ratios, as multiples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityMetrics {
    /// Current assets / current liabilities.
    pub current_ratio: Option<f64>,
    /// (Current assets - inventories) / current liabilities.
    pub quick_ratio: Option<f64>,
    /// Cash / current liabilities.
    pub absolute_ratio: Option<f64>,
}

/// Profitability ratios, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityMetrics {
    /// Return on (average) assets.
    pub roa: Option<f64>,
    /// Return on (average) equity.
    pub roe: Option<f64>,
    /// Gross margin.
    pub gross_margin: Option<f64>,
    /// Net margin.
    pub net_margin: Option<f64>,
}

/// Capital-structure stability ratios.
///
/// `autonomy` and `debt_ratio` are percentages, the other two are multiples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilityMetrics {
    /// Equity share of total assets, percent.
    pub autonomy: Option<f64>,
    /// Total assets / equity.
    pub financial_leverage: Option<f64>,
    /// Liabilities share of total assets, percent.
    pub debt_ratio: Option<f64>,
    /// Total liabilities / equity.
    pub debt_to_equity: Option<f64>,
}

/// The statements the ratios were computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPair {
    /// Current period statement.
    pub current: NormalizedStatement,
    /// Previous period statement, if one was supplied.
    pub previous: Option<NormalizedStatement>,
}

/// Every ratio for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Operating financial cycle.
    pub ofc: OfcMetrics,
    /// Liquidity.
    pub liquidity: LiquidityMetrics,
    /// Profitability.
    pub profitability: ProfitabilityMetrics,
    /// Capital-structure stability.
    pub stability: StabilityMetrics,
    /// Normalized inputs.
    pub normalized: NormalizedPair,
}

impl MetricsResult {
    /// All ratios as `(name, value)` pairs, grouped in output order.
    pub fn ratios(&self) -> [(&'static str, Option<f64>); 15] {
        [
            ("poi", self.ofc.poi),
            ("ppd", self.ofc.ppd),
            ("ppa", self.ofc.ppa),
            ("ofc", self.ofc.ofc),
            ("current_ratio", self.liquidity.current_ratio),
            ("quick_ratio", self.liquidity.quick_ratio),
            ("absolute_ratio", self.liquidity.absolute_ratio),
            ("roa", self.profitability.roa),
            ("roe", self.profitability.roe),
            ("gross_margin", self.profitability.gross_margin),
            ("net_margin", self.profitability.net_margin),
            ("autonomy", self.stability.autonomy),
            ("financial_leverage", self.stability.financial_leverage),
            ("debt_ratio", self.stability.debt_ratio),
            ("debt_to_equity", self.stability.debt_to_equity),
        ]
    }
}

/// Normalize two raw reports and compute every ratio.
pub fn calculate(current: &Value, previous: Option<&Value>) -> MetricsResult {
    calculate_normalized(normalize(current), previous.map(normalize))
}

/// Compute every ratio from already normalized statements.
pub fn calculate_normalized(
    current: NormalizedStatement,
    previous: Option<NormalizedStatement>,
) -> MetricsResult {
    let bs = &current.balance_sheet;
    let is = &current.income_statement;
    let prev_bs = previous.as_ref().map(|p| &p.balance_sheet);

    let avg_inventories = average(bs.inventories, prev_bs.map(|p| p.inventories));
    let avg_receivables = average(
        bs.accounts_receivable,
        prev_bs.map(|p| p.accounts_receivable),
    );
    let avg_payables = average(bs.accounts_payable, prev_bs.map(|p| p.accounts_payable));
    let avg_assets = average(bs.total_assets, prev_bs.map(|p| p.total_assets));
    let avg_equity = average(bs.equity, prev_bs.map(|p| p.equity));

    let revenue = is.revenue;
    let cogs = is.cost_of_goods_sold;
    let net_income = is.net_income;

    let poi = safe_divide(DAYS_IN_YEAR * avg_inventories, cogs);
    let ppd = safe_divide(DAYS_IN_YEAR * avg_receivables, revenue);
    let ppa = safe_divide(DAYS_IN_YEAR * avg_payables, cogs);
    let ofc = match (poi, ppd, ppa) {
        (Some(poi), Some(ppd), Some(ppa)) => Some(poi + ppd - ppa).filter(|d| d.is_finite()),
        _ => None,
    };

    let liquidity = LiquidityMetrics {
        current_ratio: safe_divide(bs.current_assets, bs.current_liabilities),
        quick_ratio: safe_divide(bs.current_assets - bs.inventories, bs.current_liabilities),
        absolute_ratio: safe_divide(bs.cash_and_cash_equivalents, bs.current_liabilities),
    };

    let profitability = ProfitabilityMetrics {
        roa: safe_divide(net_income * 100.0, avg_assets),
        roe: safe_divide(net_income * 100.0, avg_equity),
        gross_margin: safe_divide(revenue - cogs, revenue).map(|m| m * 100.0),
        net_margin: safe_divide(net_income, revenue).map(|m| m * 100.0),
    };

    let stability = StabilityMetrics {
        autonomy: safe_divide(bs.equity * 100.0, bs.total_assets),
        financial_leverage: safe_divide(bs.total_assets, bs.equity),
        debt_ratio: safe_divide(bs.total_liabilities * 100.0, bs.total_assets),
        debt_to_equity: safe_divide(bs.total_liabilities, bs.equity),
    };

    MetricsResult {
        ofc: OfcMetrics { poi, ppd, ppa, ofc },
        liquidity,
        profitability,
        stability,
        normalized: NormalizedPair { current, previous },
    }
}

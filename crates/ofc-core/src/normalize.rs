//! Mapping of raw provider reports onto the canonical statement schema.

use crate::coerce::normalize_field;
use crate::extract::lookup;
use crate::fields::Field;
use crate::period::{DetectedPeriod, Period, detect_period};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys the balance-sheet section may be nested under, in lookup order.
const BALANCE_SHEET_CONTAINERS: [&str; 4] = ["balance_sheet", "balance", "balanceSheet", "bs"];

/// Keys the income-statement section may be nested under, in lookup order.
const INCOME_STATEMENT_CONTAINERS: [&str; 6] = [
    "income_statement",
    "income",
    "incomeStatement",
    "profit_and_loss",
    "pnl",
    "financial_results",
];

/// Sections consulted for equity when the balance sheet reports none.
const EQUITY_FALLBACK_CONTAINERS: [&str; 1] = ["assets"];

/// Canonical balance sheet. Every field is finite; unknown amounts are `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Inventories.
    pub inventories: f64,
    /// Accounts receivable.
    pub accounts_receivable: f64,
    /// Accounts payable.
    pub accounts_payable: f64,
    /// Total current assets.
    pub current_assets: f64,
    /// Total current liabilities.
    pub current_liabilities: f64,
    /// Cash and cash equivalents.
    pub cash_and_cash_equivalents: f64,
    /// Total assets.
    pub total_assets: f64,
    /// Total liabilities.
    pub total_liabilities: f64,
    /// Equity.
    pub equity: f64,
}

/// Canonical income statement. Every field is finite; unknown amounts are `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue.
    pub revenue: f64,
    /// Cost of goods sold.
    pub cost_of_goods_sold: f64,
    /// Gross profit.
    pub gross_profit: f64,
    /// Net income.
    pub net_income: f64,
}

/// A raw report mapped onto the canonical schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStatement {
    /// Detected reporting year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Detected quarter, `None` for annual or undetectable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Income statement.
    pub income_statement: IncomeStatement,
}

impl NormalizedStatement {
    /// The statement's period, if its year was detected.
    pub const fn period(&self) -> Option<Period> {
        DetectedPeriod {
            year: self.year,
            quarter: self.quarter,
        }
        .period()
    }

    /// Value of a canonical field.
    pub const fn get(&self, field: Field) -> f64 {
        let bs = &self.balance_sheet;
        let is = &self.income_statement;
        match field {
            Field::Inventories => bs.inventories,
            Field::AccountsReceivable => bs.accounts_receivable,
            Field::AccountsPayable => bs.accounts_payable,
            Field::CurrentAssets => bs.current_assets,
            Field::CurrentLiabilities => bs.current_liabilities,
            Field::CashAndCashEquivalents => bs.cash_and_cash_equivalents,
            Field::TotalAssets => bs.total_assets,
            Field::TotalLiabilities => bs.total_liabilities,
            Field::Equity => bs.equity,
            Field::Revenue => is.revenue,
            Field::CostOfGoodsSold => is.cost_of_goods_sold,
            Field::GrossProfit => is.gross_profit,
            Field::NetIncome => is.net_income,
        }
    }
}

/// Normalize a raw report.
///
/// The balance-sheet and income-statement sections are looked up under
/// their known container names, falling back to the report itself. Each
/// canonical field is extracted through its synonym list and coerced with
/// [`normalize_field`]. Equity that comes out as zero is looked up again in
/// the `assets` section and then at the report root.
pub fn normalize(raw: &Value) -> NormalizedStatement {
    let detected = detect_period(raw);
    let balance = section(raw, &BALANCE_SHEET_CONTAINERS);
    let income = section(raw, &INCOME_STATEMENT_CONTAINERS);

    let bs = |field: Field| amount(balance, field);
    let is = |field: Field| amount(income, field);

    let balance_sheet = BalanceSheet {
        inventories: bs(Field::Inventories),
        accounts_receivable: bs(Field::AccountsReceivable),
        accounts_payable: bs(Field::AccountsPayable),
        current_assets: bs(Field::CurrentAssets),
        current_liabilities: bs(Field::CurrentLiabilities),
        cash_and_cash_equivalents: bs(Field::CashAndCashEquivalents),
        total_assets: bs(Field::TotalAssets),
        total_liabilities: bs(Field::TotalLiabilities),
        equity: equity(raw, balance),
    };

    let income_statement = IncomeStatement {
        revenue: is(Field::Revenue),
        cost_of_goods_sold: is(Field::CostOfGoodsSold),
        gross_profit: is(Field::GrossProfit),
        net_income: is(Field::NetIncome),
    };

    NormalizedStatement {
        year: detected.year,
        quarter: detected.quarter,
        balance_sheet,
        income_statement,
    }
}

/// Pick the first container-typed value among `keys`, else the report itself.
fn section<'a>(raw: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find(|value| value.is_object() || value.is_array())
        .unwrap_or(raw)
}

fn amount(source: &Value, field: Field) -> f64 {
    normalize_field(lookup(source, field.synonyms()))
}

fn equity(raw: &Value, balance: &Value) -> f64 {
    let primary = amount(balance, Field::Equity);
    if primary != 0.0 {
        return primary;
    }

    EQUITY_FALLBACK_CONTAINERS
        .iter()
        .filter_map(|key| raw.get(key))
        .chain(std::iter::once(raw))
        .map(|source| normalize_field(lookup(source, &["equity"])))
        .find(|value| *value != 0.0)
        .unwrap_or(0.0)
}

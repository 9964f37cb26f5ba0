//! Canonical statement fields and the source keys accepted for each.
//!
//! Providers name the same line item differently across API versions, and
//! Russian statements (RSBU forms 1 and 2) are frequently delivered keyed by
//! line code instead of by name. Every canonical field lists the keys it may
//! be found under, in order of preference; the last entries are the RSBU line
//! codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonical balance-sheet or income-statement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Inventories (line 1210).
    Inventories,
    /// Accounts receivable (line 1230).
    AccountsReceivable,
    /// Accounts payable (line 1520).
    AccountsPayable,
    /// Total current assets (line 1200).
    CurrentAssets,
    /// Total current liabilities (line 1500).
    CurrentLiabilities,
    /// Cash and cash equivalents (line 1250).
    CashAndCashEquivalents,
    /// Balance sheet total (line 1600).
    TotalAssets,
    /// Total liabilities.
    TotalLiabilities,
    /// Capital and reserves (line 1300).
    Equity,
    /// Revenue (line 2110).
    Revenue,
    /// Cost of sales (line 2120).
    CostOfGoodsSold,
    /// Gross profit (line 2100).
    GrossProfit,
    /// Net profit (line 2400).
    NetIncome,
}

impl Field {
    /// Balance-sheet fields in canonical order.
    pub const BALANCE_SHEET: [Self; 9] = [
        Self::Inventories,
        Self::AccountsReceivable,
        Self::AccountsPayable,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::CashAndCashEquivalents,
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::Equity,
    ];

    /// Income-statement fields in canonical order.
    pub const INCOME_STATEMENT: [Self; 4] = [
        Self::Revenue,
        Self::CostOfGoodsSold,
        Self::GrossProfit,
        Self::NetIncome,
    ];

    /// The canonical (serialized) name of the field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inventories => "inventories",
            Self::AccountsReceivable => "accounts_receivable",
            Self::AccountsPayable => "accounts_payable",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::CashAndCashEquivalents => "cash_and_cash_equivalents",
            Self::TotalAssets => "total_assets",
            Self::TotalLiabilities => "total_liabilities",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::CostOfGoodsSold => "cost_of_goods_sold",
            Self::GrossProfit => "gross_profit",
            Self::NetIncome => "net_income",
        }
    }

    /// Source keys accepted for this field, most preferred first.
    ///
    /// The canonical name always comes first, so a statement that was already
    /// normalized maps back onto itself.
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Inventories => &["inventories", "inventory", "stocks", "zapasy", "1210"],
            Self::AccountsReceivable => &[
                "accounts_receivable",
                "receivables",
                "debtors",
                "debitors",
                "1230",
            ],
            Self::AccountsPayable => &["accounts_payable", "payables", "creditors", "1520"],
            Self::CurrentAssets => &["current_assets", "total_current_assets", "1200"],
            Self::CurrentLiabilities => &[
                "current_liabilities",
                "total_current_liabilities",
                "short_term_liabilities",
                "1500",
            ],
            Self::CashAndCashEquivalents => &["cash_and_cash_equivalents", "cash", "1250"],
            Self::TotalAssets => &[
                "total_assets",
                "assets_total",
                "balance_total",
                "balance",
                "1600",
            ],
            Self::TotalLiabilities => &["total_liabilities", "liabilities_total"],
            Self::Equity => &["equity", "capital", "1300"],
            Self::Revenue => &["revenue", "sales", "2110"],
            Self::CostOfGoodsSold => &[
                "cost_of_goods_sold",
                "cogs",
                "prime_cost",
                "cost_of_sales",
                "2120",
            ],
            Self::GrossProfit => &["gross_profit", "2100"],
            Self::NetIncome => &["net_income", "profit", "net_profit", "2400"],
        }
    }

    /// Whether the field belongs to the balance sheet.
    pub const fn is_balance_sheet(self) -> bool {
        !matches!(
            self,
            Self::Revenue | Self::CostOfGoodsSold | Self::GrossProfit | Self::NetIncome
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

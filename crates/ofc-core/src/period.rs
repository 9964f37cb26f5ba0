//! Reporting periods and their detection in raw reports.

use crate::coerce::to_integer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort position of an annual report relative to the quarters of its year.
const ANNUAL_SORT_KEY: u8 = 5;

/// A reporting period: a year, optionally narrowed to a quarter.
///
/// An absent quarter is an annual report. Periods order by year, then by
/// quarter, with the annual report after all quarters of the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Calendar (reporting) year.
    pub year: i32,
    /// Quarter 1-4, `None` for an annual report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
}

impl Period {
    /// An annual period.
    pub const fn annual(year: i32) -> Self {
        Self {
            year,
            quarter: None,
        }
    }

    /// A quarterly period.
    pub const fn quarterly(year: i32, quarter: u8) -> Self {
        Self {
            year,
            quarter: Some(quarter),
        }
    }

    /// Whether this is an annual period.
    pub const fn is_annual(&self) -> bool {
        self.quarter.is_none()
    }

    /// The `(year, quarter)` pair used for ordering, annual mapped after Q4.
    pub const fn sort_key(&self) -> (i32, u8) {
        match self.quarter {
            Some(quarter) => (self.year, quarter),
            None => (self.year, ANNUAL_SORT_KEY),
        }
    }

    /// The period immediately before this one.
    ///
    /// The previous year for an annual period, the previous quarter otherwise
    /// (Q1 rolls back to Q4 of the previous year).
    pub const fn preceding(&self) -> Self {
        match self.quarter {
            None => Self::annual(self.year.saturating_sub(1)),
            Some(quarter) if quarter <= 1 => Self::quarterly(self.year.saturating_sub(1), 4),
            Some(quarter) => Self::quarterly(self.year, quarter - 1),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.quarter.cmp(&other.quarter))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quarter {
            Some(quarter) => write!(f, "{} Q{}", self.year, quarter),
            None => write!(f, "{}", self.year),
        }
    }
}

/// Error returned when parsing a [`Period`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePeriodError(String);

impl fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid period '{}', expected YYYY or YYYY-Qn (n = 1..4)",
            self.0
        )
    }
}

impl std::error::Error for ParsePeriodError {}

impl FromStr for Period {
    type Err = ParsePeriodError;

    /// Parses `2023`, `2023Q4`, `2023-Q4`, `2023 Q4` and `2023-4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePeriodError(s.to_string());
        let trimmed = s.trim();

        let (year_part, quarter_part) = match trimmed.find(['Q', 'q', '-', ' ']) {
            Some(idx) => {
                let rest = trimmed[idx..].trim_start_matches(['-', ' ']);
                let rest = rest.trim_start_matches(['Q', 'q']);
                (&trimmed[..idx], Some(rest))
            }
            None => (trimmed, None),
        };

        let year: i32 = year_part.parse().map_err(|_| err())?;
        match quarter_part {
            None => Ok(Self::annual(year)),
            Some(q) => {
                let quarter: u8 = q.parse().map_err(|_| err())?;
                if (1..=4).contains(&quarter) {
                    Ok(Self::quarterly(year, quarter))
                } else {
                    Err(err())
                }
            }
        }
    }
}

/// The period identifiers found in a raw report.
///
/// Either part may be missing when the report does not carry it in any of
/// the recognised places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPeriod {
    /// Detected year.
    pub year: Option<i32>,
    /// Detected quarter. A quarter of `0` is reported as `None`.
    pub quarter: Option<u8>,
}

impl DetectedPeriod {
    /// The detected period, if a year was found.
    pub const fn period(&self) -> Option<Period> {
        match self.year {
            Some(year) => Some(Period {
                year,
                quarter: self.quarter,
            }),
            None => None,
        }
    }
}

/// Containers that may hold `year`/`quarter` for the report.
const NESTED_PERIOD_KEYS: [&str; 2] = ["period", "report_period"];

/// Top-level alternates for the year, after the direct and nested forms.
const YEAR_ALIASES: [&str; 3] = ["report_year", "fiscal_year", "fy"];

/// Top-level alternates for the quarter, after the direct and nested forms.
const QUARTER_ALIASES: [&str; 2] = ["report_quarter", "fiscal_quarter"];

/// Detect the `(year, quarter)` of a raw report.
///
/// Precedence: direct `year`/`quarter` fields, then the same fields inside a
/// nested `period` or `report_period` object, then the alias fields
/// (`report_year`, `fiscal_year`, `fy`, `report_quarter`, `fiscal_quarter`).
/// Values are coerced numerically; anything that is not a whole number is
/// skipped. Never fails.
pub fn detect_period(report: &Value) -> DetectedPeriod {
    let year = find_integer(report, "year", &YEAR_ALIASES)
        .and_then(|year| i32::try_from(year).ok());
    let quarter = find_integer(report, "quarter", &QUARTER_ALIASES)
        .and_then(|quarter| u8::try_from(quarter).ok())
        .filter(|quarter| *quarter != 0);

    DetectedPeriod { year, quarter }
}

fn find_integer(report: &Value, key: &str, aliases: &[&str]) -> Option<i64> {
    let direct = std::iter::once(report.get(key));
    let nested = NESTED_PERIOD_KEYS
        .iter()
        .map(|container| report.get(container).and_then(|inner| inner.get(key)));
    let aliased = aliases.iter().map(|alias| report.get(alias));

    direct
        .chain(nested)
        .chain(aliased)
        .flatten()
        .find_map(to_integer)
}

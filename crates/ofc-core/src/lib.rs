#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ofc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
pub use coerce::{normalize_field, to_number};

mod extract;
pub use extract::{extract, lookup};

mod fields;
pub use fields::Field;

mod period;
pub use period::{DetectedPeriod, ParsePeriodError, Period, detect_period};

mod normalize;
pub use normalize::{BalanceSheet, IncomeStatement, NormalizedStatement, normalize};

mod metrics;
pub use metrics::{
    DAYS_IN_YEAR, LiquidityMetrics, MetricsResult, NormalizedPair, OfcMetrics,
    ProfitabilityMetrics, StabilityMetrics, average, calculate, calculate_normalized,
    safe_divide,
};

mod select;
pub use select::select;

mod locate;
pub use locate::{locate, looks_like_reports};

mod outcome;
pub use outcome::{CompanyAnalysis, PeriodMetrics};

/// A raw provider report. Its shape is not fixed.
pub type RawReport = serde_json::Value;

//! Per-company analysis results.

use crate::metrics::MetricsResult;
use crate::period::Period;
use serde::{Deserialize, Serialize};

/// Ratios for one requested period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// The requested period.
    pub period: Period,
    /// The period whose report was used for averaging, if any.
    pub previous_period: Option<Period>,
    /// Computed ratios.
    pub metrics: MetricsResult,
}

/// Every requested period for one company, in ascending period order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    /// Taxpayer identification number.
    pub inn: String,
    /// Label of the data source the reports came from.
    pub source: String,
    /// Per-period results.
    pub periods: Vec<PeriodMetrics>,
}

impl CompanyAnalysis {
    /// The result for a period, if it was requested.
    pub fn period(&self, period: Period) -> Option<&PeriodMetrics> {
        self.periods.iter().find(|p| p.period == period)
    }

    /// The most recent period's result.
    pub fn latest(&self) -> Option<&PeriodMetrics> {
        self.periods.iter().max_by_key(|p| p.period)
    }
}

//! Error types for analysis runs.

use ofc_core::Period;
use ofc_data::DataError;
use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while analysing a company.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Fetching statements failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// No report matches a requested period
    #[error("No financial report for INN {inn}, period {period}")]
    MissingData {
        /// Company that was queried
        inn: String,
        /// Period without a report
        period: Period,
    },

    /// No periods were requested
    #[error("At least one period is required")]
    NoPeriods,

    /// No INNs were requested
    #[error("At least one INN is required")]
    NoInns,
}

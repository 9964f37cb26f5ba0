#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ofc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod error;

// Re-export main types from sub-crates
pub use ofc_core as engine;
pub use ofc_data as data;
pub use ofc_output as output;

pub use analysis::{AnalysisConfig, Analyzer, DEFAULT_CONCURRENCY, prepare_periods};
pub use error::{AnalysisError, Result};

// Re-export common types
pub use ofc_core::{CompanyAnalysis, MetricsResult, Period, PeriodMetrics, RawReport};
pub use ofc_data::{DataSource, FinancialsSource, ProviderConfig};
pub use ofc_output::{AnalysisReport, CompanyOutcome, ExportFormat, Exporter};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

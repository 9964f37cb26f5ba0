#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ofc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod summary;

pub use export::{
    AnalysisReport, CompanyOutcome, ExportError, ExportFormat, Exporter, MetricsRow,
};
pub use summary::{format_ratio, render_company, render_report};

//! Export of analysis results.
//!
//! Reports serialize to JSON as nested structures. CSV output flattens each
//! company and period into one [`MetricsRow`].

use chrono::{DateTime, Utc};
use ofc_core::{CompanyAnalysis, PeriodMetrics};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file name's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::PrettyJson),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::PrettyJson => "pretty-json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// The result for one INN: either the analysis or why it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompanyOutcome {
    /// Every requested period was computed.
    Completed(CompanyAnalysis),

    /// The INN could not be analysed.
    Failed {
        /// Taxpayer identification number.
        inn: String,
        /// Error message.
        error: String,
    },
}

impl CompanyOutcome {
    /// The INN this outcome belongs to.
    pub fn inn(&self) -> &str {
        match self {
            Self::Completed(analysis) => &analysis.inn,
            Self::Failed { inn, .. } => inn,
        }
    }

    /// The analysis, if it completed.
    pub const fn analysis(&self) -> Option<&CompanyAnalysis> {
        match self {
            Self::Completed(analysis) => Some(analysis),
            Self::Failed { .. } => None,
        }
    }

    /// The error message, if it failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// One analysis run over a set of INNs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,

    /// Whether demo data was used.
    pub mock_mode: bool,

    /// Label of the data source.
    pub source: String,

    /// Per-INN outcomes, in request order.
    pub companies: Vec<CompanyOutcome>,
}

impl AnalysisReport {
    /// Create a report stamped with the current time.
    pub fn new(source: impl Into<String>, mock_mode: bool, companies: Vec<CompanyOutcome>) -> Self {
        Self {
            generated_at: Utc::now(),
            mock_mode,
            source: source.into(),
            companies,
        }
    }

    /// Completed analyses.
    pub fn completed(&self) -> impl Iterator<Item = &CompanyAnalysis> {
        self.companies.iter().filter_map(CompanyOutcome::analysis)
    }

    /// Number of INNs that failed.
    pub fn failure_count(&self) -> usize {
        self.companies
            .iter()
            .filter(|c| c.error().is_some())
            .count()
    }

    /// Flatten into CSV rows, one per INN and period.
    ///
    /// A failed INN yields a single row carrying only the error.
    pub fn to_rows(&self) -> Vec<MetricsRow> {
        self.companies
            .iter()
            .flat_map(|outcome| match outcome {
                CompanyOutcome::Completed(analysis) => analysis
                    .periods
                    .iter()
                    .map(|period| MetricsRow::from_period(&analysis.inn, period))
                    .collect::<Vec<_>>(),
                CompanyOutcome::Failed { inn, error } => vec![MetricsRow::failed(inn, error)],
            })
            .collect()
    }
}

/// Flat per-(INN, period) record of every ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// Taxpayer identification number.
    pub inn: String,
    /// Reporting year.
    pub year: Option<i32>,
    /// Quarter, empty for annual.
    pub quarter: Option<u8>,
    /// Period used for averaging.
    pub previous_period: Option<String>,
    /// Inventory period, days.
    pub poi: Option<f64>,
    /// Receivables period, days.
    pub ppd: Option<f64>,
    /// Payables period, days.
    pub ppa: Option<f64>,
    /// Operating financial cycle, days.
    pub ofc: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,
    /// Absolute liquidity ratio.
    pub absolute_ratio: Option<f64>,
    /// Return on assets, percent.
    pub roa: Option<f64>,
    /// Return on equity, percent.
    pub roe: Option<f64>,
    /// Gross margin, percent.
    pub gross_margin: Option<f64>,
    /// Net margin, percent.
    pub net_margin: Option<f64>,
    /// Autonomy, percent.
    pub autonomy: Option<f64>,
    /// Financial leverage.
    pub financial_leverage: Option<f64>,
    /// Debt ratio, percent.
    pub debt_ratio: Option<f64>,
    /// Debt to equity.
    pub debt_to_equity: Option<f64>,
    /// Error message for a failed INN.
    pub error: Option<String>,
}

impl MetricsRow {
    /// Row for one computed period.
    pub fn from_period(inn: &str, period: &PeriodMetrics) -> Self {
        let m = &period.metrics;
        Self {
            inn: inn.to_string(),
            year: Some(period.period.year),
            quarter: period.period.quarter,
            previous_period: period.previous_period.map(|p| p.to_string()),
            poi: m.ofc.poi,
            ppd: m.ofc.ppd,
            ppa: m.ofc.ppa,
            ofc: m.ofc.ofc,
            current_ratio: m.liquidity.current_ratio,
            quick_ratio: m.liquidity.quick_ratio,
            absolute_ratio: m.liquidity.absolute_ratio,
            roa: m.profitability.roa,
            roe: m.profitability.roe,
            gross_margin: m.profitability.gross_margin,
            net_margin: m.profitability.net_margin,
            autonomy: m.stability.autonomy,
            financial_leverage: m.stability.financial_leverage,
            debt_ratio: m.stability.debt_ratio,
            debt_to_equity: m.stability.debt_to_equity,
            error: None,
        }
    }

    /// Row for an INN that could not be analysed.
    pub fn failed(inn: &str, error: &str) -> Self {
        Self {
            inn: inn.to_string(),
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a writer in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn export_to_writer(
        &self,
        writer: &mut dyn Write,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        writer.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let mut file = File::create(path)?;
        self.export_to_writer(&mut file, format)
    }
}

fn rows_to_csv(rows: &[MetricsRow]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)?;
    Ok(data)
}

impl Exporter for AnalysisReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => rows_to_csv(&self.to_rows()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for CompanyAnalysis {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let rows: Vec<MetricsRow> = self
                    .periods
                    .iter()
                    .map(|period| MetricsRow::from_period(&self.inn, period))
                    .collect();
                rows_to_csv(&rows)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

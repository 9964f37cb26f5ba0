//! Demo data source.

use crate::error::{DataError, Result};
use crate::source::{FinancialsSource, validate_inn};
use ofc_core::{RawReport, locate};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Sample statements shipped with the crate.
const BUNDLED_DATASET: &str = include_str!("../data/sample-financials.json");

/// Source label for demo data.
pub const MOCK_LABEL: &str = "Demo data";

/// Serves a fixed set of reports to every INN.
#[derive(Debug, Clone)]
pub struct MockSource {
    reports: Vec<RawReport>,
}

impl MockSource {
    /// The dataset bundled with the crate.
    pub fn bundled() -> Result<Self> {
        let payload: Value = serde_json::from_str(BUNDLED_DATASET)?;
        Self::from_value(&payload)
    }

    /// Load a dataset from a JSON file.
    ///
    /// The file may hold a bare report array or any response that wraps one.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let payload: Value = serde_json::from_str(&text)?;
        info!(path = %path.display(), "loaded mock dataset");
        Self::from_value(&payload)
    }

    /// Use the reports found in an in-memory payload.
    ///
    /// # Errors
    /// Returns `DataError::Parse` when the payload contains no report array.
    pub fn from_value(payload: &Value) -> Result<Self> {
        let reports = locate(payload);
        if reports.is_empty() {
            return Err(DataError::Parse(
                "mock dataset contains no financial reports".to_string(),
            ));
        }
        Ok(Self {
            reports: reports.to_vec(),
        })
    }

    /// Every report in the dataset.
    pub fn reports(&self) -> &[RawReport] {
        &self.reports
    }
}

impl FinancialsSource for MockSource {
    fn label(&self) -> &str {
        MOCK_LABEL
    }

    fn is_mock(&self) -> bool {
        true
    }

    async fn fetch_reports(&self, inn: &str, year: i32) -> Result<Vec<RawReport>> {
        let inn = validate_inn(inn)?;
        debug!(inn, year, reports = self.reports.len(), "serving mock reports");
        Ok(self.reports.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundled_dataset_parses() {
        let mock = MockSource::bundled().unwrap();
        assert!(mock.reports().len() >= 8);
    }

    #[test]
    fn test_from_value_wrapped() {
        let payload = json!({ "data": { "reports": [{ "year": 2020 }] } });
        let mock = MockSource::from_value(&payload).unwrap();
        assert_eq!(mock.reports(), &[json!({ "year": 2020 })]);
    }

    #[test]
    fn test_from_value_without_reports() {
        let err = MockSource::from_value(&json!({ "data": [] })).unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = MockSource::from_file("/nonexistent/ofc-mock.json").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[tokio::test]
    async fn test_same_reports_for_every_inn() {
        let mock = MockSource::bundled().unwrap();
        let a = mock.fetch_reports("7707083893", 2023).await.unwrap();
        let b = mock.fetch_reports("500100732259", 2021).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_rejects_invalid_inn() {
        let mock = MockSource::bundled().unwrap();
        let err = mock.fetch_reports("not-an-inn", 2023).await.unwrap_err();
        assert!(matches!(err, DataError::InvalidInn(_)));
    }
}

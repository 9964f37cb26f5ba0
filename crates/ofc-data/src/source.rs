//! The data source seam and the configured source.

use crate::checko::CheckoClient;
use crate::config::ProviderConfig;
use crate::error::{DataError, Result};
use crate::mock::MockSource;
use ofc_core::RawReport;
use std::future::Future;

/// A provider of raw financial statements.
pub trait FinancialsSource: Send + Sync {
    /// Human readable name of the source.
    fn label(&self) -> &str;

    /// Whether the source serves demo data.
    fn is_mock(&self) -> bool {
        false
    }

    /// Fetch the raw reports relevant to `year` for a company.
    ///
    /// The collection may contain reports for other periods; the caller
    /// selects the one it needs.
    fn fetch_reports(
        &self,
        inn: &str,
        year: i32,
    ) -> impl Future<Output = Result<Vec<RawReport>>> + Send;
}

/// Check an INN and return it trimmed.
///
/// Any non-empty run of ASCII digits is accepted; the check-digit scheme is
/// not verified.
pub fn validate_inn(inn: &str) -> Result<&str> {
    let trimmed = inn.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DataError::InvalidInn(inn.to_string()));
    }
    Ok(trimmed)
}

/// The source selected by a [`ProviderConfig`].
#[derive(Debug)]
pub enum DataSource {
    /// Demo data.
    Mock(MockSource),
    /// Live Checko API.
    Checko(CheckoClient),
}

impl DataSource {
    /// Build the source the configuration asks for.
    ///
    /// # Errors
    /// Fails when the mock dataset cannot be read, or when live mode is
    /// requested without an API key.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        if config.mock_mode {
            let mock = match &config.mock_data {
                Some(path) => MockSource::from_file(path)?,
                None => MockSource::bundled()?,
            };
            Ok(Self::Mock(mock))
        } else {
            Ok(Self::Checko(CheckoClient::new(config)?))
        }
    }
}

impl FinancialsSource for DataSource {
    fn label(&self) -> &str {
        match self {
            Self::Mock(mock) => mock.label(),
            Self::Checko(client) => client.label(),
        }
    }

    fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }

    async fn fetch_reports(&self, inn: &str, year: i32) -> Result<Vec<RawReport>> {
        match self {
            Self::Mock(mock) => mock.fetch_reports(inn, year).await,
            Self::Checko(client) => client.fetch_reports(inn, year).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7707083893", Some("7707083893"))]
    #[case("  500100732259 ", Some("500100732259"))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("77070-83893", None)]
    #[case("７７０７", None)]
    fn test_validate_inn(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(validate_inn(input).ok(), expected);
    }

    #[test]
    fn test_invalid_inn_error_keeps_input() {
        let err = validate_inn("abc").unwrap_err();
        assert!(matches!(err, DataError::InvalidInn(ref inn) if inn == "abc"));
    }

    #[test]
    fn test_live_without_key_fails() {
        let config = ProviderConfig {
            mock_mode: false,
            ..ProviderConfig::default()
        };
        assert!(matches!(
            DataSource::from_config(&config),
            Err(DataError::MissingApiKey)
        ));
    }

    #[test]
    fn test_default_config_is_bundled_mock() {
        let source = DataSource::from_config(&ProviderConfig::default()).unwrap();
        assert!(source.is_mock());
        assert_eq!(source.label(), "Demo data");
    }

    #[test]
    fn test_live_config_is_checko() {
        let config = ProviderConfig {
            api_key: Some("secret".to_string()),
            mock_mode: false,
            ..ProviderConfig::default()
        };
        let source = DataSource::from_config(&config).unwrap();
        assert!(!source.is_mock());
        assert_eq!(source.label(), "Checko API");
    }
}

//! Data provider configuration.

use crate::checko::CHECKO_LABEL;
use crate::mock::MOCK_LABEL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Checko companies endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.checko.ru/v3/companies";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API key variable.
pub const API_KEY_VAR: &str = "CHECKO_API_KEY";
/// Base URL variable.
pub const BASE_URL_VAR: &str = "CHECKO_API_BASE";
/// Mock mode switch; only the value `true` enables it.
pub const MOCK_MODE_VAR: &str = "CHECKO_MOCK_MODE";
/// Path of an alternative mock dataset.
pub const MOCK_DATA_VAR: &str = "OFC_MOCK_DATA";

/// Where statements come from and how to reach the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Checko API key. Live mode is impossible without one.
    pub api_key: Option<String>,
    /// Companies endpoint, without a trailing slash.
    pub base_url: String,
    /// Serve demo data instead of calling the provider.
    pub mock_mode: bool,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Dataset to serve in mock mode instead of the bundled one.
    pub mock_data: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_mode: true,
            timeout: DEFAULT_TIMEOUT,
            mock_data: None,
        }
    }
}

impl ProviderConfig {
    /// Read the configuration from the environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// when present. Mock mode is on when `CHECKO_MOCK_MODE=true` or when no
    /// API key is set.
    pub fn from_env() -> Self {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_empty(API_KEY_VAR);
        let base_url = non_empty(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mock_requested = non_empty(MOCK_MODE_VAR).is_some_and(|flag| flag == "true");

        Self {
            mock_mode: mock_requested || api_key.is_none(),
            api_key,
            base_url,
            timeout: DEFAULT_TIMEOUT,
            mock_data: non_empty(MOCK_DATA_VAR).map(PathBuf::from),
        }
    }

    /// Whether an API key is configured.
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Label of the source this configuration selects.
    pub const fn source_label(&self) -> &'static str {
        if self.mock_mode { MOCK_LABEL } else { CHECKO_LABEL }
    }

    /// Switch to mock mode.
    pub fn with_mock(mut self, mock_data: Option<PathBuf>) -> Self {
        self.mock_mode = true;
        if mock_data.is_some() {
            self.mock_data = mock_data;
        }
        self
    }

    /// Use another companies endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use another request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_key_are_mock() {
        let config = ProviderConfig::from_lookup(lookup(&[]));
        assert!(config.mock_mode);
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config, ProviderConfig::default());
    }

    #[test]
    fn test_key_enables_live_mode() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://localhost:8080/v3/companies/"),
        ]));
        assert!(!config.mock_mode);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url, "http://localhost:8080/v3/companies");
    }

    #[test]
    fn test_source_label_follows_mode() {
        assert_eq!(ProviderConfig::default().source_label(), MOCK_LABEL);
        let live = ProviderConfig::from_lookup(lookup(&[(API_KEY_VAR, "secret")]));
        assert_eq!(live.source_label(), CHECKO_LABEL);
    }

    #[test]
    fn test_mock_flag_must_be_true() {
        let on = ProviderConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MOCK_MODE_VAR, "true"),
        ]));
        assert!(on.mock_mode);

        let off = ProviderConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MOCK_MODE_VAR, "1"),
        ]));
        assert!(!off.mock_mode);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = ProviderConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")]));
        assert!(config.mock_mode);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MOCK_DATA_VAR, "/tmp/reports.json"),
        ]))
        .with_base_url("http://proxy/")
        .with_timeout(Duration::from_secs(5))
        .with_mock(None);

        assert!(config.mock_mode);
        assert_eq!(config.base_url, "http://proxy");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.mock_data, Some(PathBuf::from("/tmp/reports.json")));
    }
}

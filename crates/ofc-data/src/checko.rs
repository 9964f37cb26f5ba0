//! Checko companies API client.

use crate::config::ProviderConfig;
use crate::error::{DataError, Result};
use crate::source::{FinancialsSource, validate_inn};
use ofc_core::{RawReport, detect_period, locate};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, warn};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("ofc/", env!("CARGO_PKG_VERSION"));

/// Source label for live Checko data.
pub const CHECKO_LABEL: &str = "Checko API";

/// HTTP client for `{base_url}/{inn}/financials`.
pub struct CheckoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for CheckoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl CheckoClient {
    /// Create a client from the provider configuration.
    ///
    /// # Errors
    /// Returns `DataError::MissingApiKey` when no key is configured.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or(DataError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build the financials request for a company and year.
    pub fn request(&self, inn: &str, year: i32) -> Result<reqwest::Request> {
        let inn = validate_inn(inn)?;
        let url = format!("{}/{inn}/financials", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("year", year.to_string()), ("key", self.api_key.clone())])
            .build()?;
        Ok(request)
    }

    /// Fetch the raw financials response body.
    pub async fn fetch_response(&self, inn: &str, year: i32) -> Result<Value> {
        let request = self.request(inn, year)?;
        info!(inn, year, "fetching financials from Checko");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(DataError::Network)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Http(format!(
                "financials for INN {inn}: HTTP {status}: {}",
                text.trim()
            )));
        }

        let text = response.text().await.map_err(DataError::Network)?;
        let body: Value = serde_json::from_str(&text)?;
        check_provider_error(&body)?;
        Ok(body)
    }
}

impl FinancialsSource for CheckoClient {
    fn label(&self) -> &str {
        CHECKO_LABEL
    }

    async fn fetch_reports(&self, inn: &str, year: i32) -> Result<Vec<RawReport>> {
        let body = self.fetch_response(inn, year).await?;
        let reports = extract_reports(&body);
        if reports.is_empty() {
            warn!(inn, year, "Checko response contained no financial reports");
        }
        Ok(reports)
    }
}

/// Surface an error the provider reported inside a successful response.
///
/// Checko wraps payloads as `{"data": …, "meta": {"status": …, "message": …}}`.
pub fn check_provider_error(body: &Value) -> Result<()> {
    let Some(meta) = body.get("meta") else {
        return Ok(());
    };
    match meta.get("status").and_then(Value::as_str) {
        Some("error") => {
            let message = meta
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            Err(DataError::Provider(message.to_string()))
        }
        _ => Ok(()),
    }
}

/// Pull the report list out of a financials response.
///
/// The report array is searched for first. Failing that, a year-keyed object
/// (`{"2022": {...}, "2023": {...}}`, at the root or under `data`) is turned
/// into one report per year, each tagged with its `year`.
pub fn extract_reports(body: &Value) -> Vec<RawReport> {
    let located = locate(body);
    if !located.is_empty() {
        return located.to_vec();
    }

    let keyed = body
        .get("data")
        .and_then(Value::as_object)
        .or_else(|| body.as_object());
    let reports = keyed.map(reports_from_year_keys).unwrap_or_default();
    debug!(reports = reports.len(), "converted year-keyed response");
    reports
}

fn reports_from_year_keys(map: &Map<String, Value>) -> Vec<RawReport> {
    map.iter()
        .filter_map(|(key, value)| {
            let year = parse_year_key(key)?;
            let mut report = value.as_object()?.clone();
            if detect_period(value).year.is_none() {
                report.insert("year".to_string(), Value::from(year));
            }
            Some(Value::Object(report))
        })
        .collect()
}

fn parse_year_key(key: &str) -> Option<i32> {
    if key.len() != 4 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching financial statements.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider reported an error in an otherwise successful response
    #[error("Provider error: {0}")]
    Provider(String),

    /// Rate limit error
    #[error("Rate limit exceeded by the data provider")]
    RateLimited,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No API key configured for live mode
    #[error("CHECKO_API_KEY is not set")]
    MissingApiKey,

    /// INN is empty or not numeric
    #[error("Invalid INN: '{0}'")]
    InvalidInn(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),
}

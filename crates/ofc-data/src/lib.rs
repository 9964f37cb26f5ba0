#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ofc/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod checko;
pub mod config;
pub mod error;
pub mod mock;
pub mod source;

pub use checko::{CHECKO_LABEL, CheckoClient};
pub use config::ProviderConfig;
pub use error::{DataError, Result};
pub use mock::{MOCK_LABEL, MockSource};
pub use source::{DataSource, FinancialsSource, validate_inn};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

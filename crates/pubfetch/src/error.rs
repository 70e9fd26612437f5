//! Error types for the pubfetch library.
//!
//! Every fallible operation in the crate returns [`PubfetchError`], which groups failures into
//! the three kinds the pipeline can hit:
//! - transport failures while talking to E-utilities ([`PubfetchError::Network`],
//!   [`PubfetchError::HttpStatus`])
//! - malformed or unexpected upstream payloads ([`PubfetchError::Xml`],
//!   [`PubfetchError::Json`], [`PubfetchError::MissingElement`], [`PubfetchError::ApiError`])
//! - local problems with configuration or the export file
//!
//! # Examples
//!
//! ```no_run
//! use pubfetch::{fetcher::Fetcher, prelude::*, FetcherConfig};
//!
//! # async fn example() -> Result<(), PubfetchError> {
//! let fetcher = Fetcher::from_config(FetcherConfig::default())?;
//! match fetcher.fetch_papers("heart disease").await {
//!   Ok(records) => println!("{} records", records.len()),
//!   Err(PubfetchError::Network(e)) => println!("Network error: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`pubfetch`](crate) crate.
pub type Result<T> = core::result::Result<T, PubfetchError>;

/// Errors that can occur while searching, parsing, classifying or exporting.
#[derive(Error, Debug)]
pub enum PubfetchError {
  /// A network request failed before a response was received.
  ///
  /// This covers DNS and connection failures, TLS errors and body read failures. No retry is
  /// attempted.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// E-utilities answered with a non-success HTTP status.
  #[error("{endpoint} request failed with HTTP status {status}")]
  HttpStatus {
    /// Which endpoint was called (`esearch` or `efetch`)
    endpoint: &'static str,
    /// The status code returned
    status:   u16,
  },

  /// E-utilities answered successfully but reported an error in the payload.
  ///
  /// The string holds the message returned by the API.
  #[error("API error: {0}")]
  ApiError(String),

  /// An XML document could not be read.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// A JSON search response could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A structurally required element was absent from an article entry.
  ///
  /// Only the article identifier is required; every other field falls back to a placeholder.
  #[error("Required element <{0}> not found in response")]
  MissingElement(&'static str),

  /// The XML document ended before every element was closed.
  #[error("Truncated XML document: <{0}> was never closed")]
  TruncatedDocument(String),

  /// A file system operation failed.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// Writing the CSV export failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// A keyword set could not be compiled into a matcher.
  #[error(transparent)]
  Regex(#[from] regex::Error),

  /// The configuration is syntactically valid but unusable.
  #[error("{0}")]
  Config(String),
}

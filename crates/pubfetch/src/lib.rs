//! PubMed search and author affiliation screening library.
//!
//! `pubfetch` runs a short, strictly sequential pipeline against the NCBI E-utilities API:
//!
//! - search PubMed for a free-text query and collect a bounded list of PMIDs
//! - fetch the full article metadata for those PMIDs in a single request
//! - classify each author's affiliation as company, academic or other
//! - export one CSV row per article
//!
//! # Getting Started
//!
//! ```no_run
//! use pubfetch::{export::export, fetcher::Fetcher, prelude::*, FetcherConfig};
//!
//! # async fn example() -> Result<(), PubfetchError> {
//! let fetcher = Fetcher::from_config(FetcherConfig::default())?;
//! let records = fetcher.fetch_papers("crispr off-target").await?;
//! if !records.is_empty() {
//!   export(&records, "result.csv")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`config`]: Endpoint, result cap and keyword configuration
//! - [`client`]: The [`EntrezClient`] network seam and its HTTP implementation
//! - [`response`]: Parsing of search and detail responses
//! - [`classify`]: Affiliation heuristics that turn an article entry into a [`Record`]
//! - [`fetcher`]: The search-then-fetch pipeline
//! - [`export`]: CSV output
//! - [`prelude`]: Common traits and types for ergonomic imports

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{collections::BTreeMap, io::Write, path::Path};

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, trace, warn};

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod record;
pub mod response;

pub use crate::{
  classify::{AffiliationKind, Classifier},
  client::{EntrezClient, HttpEntrez},
  config::{FetcherConfig, KeywordConfig, SearchFormat},
  record::{Author, Record},
};
use crate::{error::*, response::xml::Element};

/// Placeholder written for any field the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pubfetch::prelude::*;
///
/// fn report(result: Result<(), PubfetchError>) {
///   if let Err(e) = result {
///     eprintln!("{e}");
///   }
/// }
/// ```
pub mod prelude {
  pub use crate::{client::EntrezClient, error::PubfetchError};
}

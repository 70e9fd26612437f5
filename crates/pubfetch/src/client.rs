//! Network access to NCBI E-utilities.
//!
//! The pipeline only ever needs two calls, so the network is hidden behind the narrow
//! [`EntrezClient`] trait. [`HttpEntrez`] is the real implementation; tests provide their own
//! to run classification fully offline.

use super::*;

/// The two E-utilities calls the pipeline makes.
///
/// # Examples
///
/// A canned client that serves a fixed document:
///
/// ```
/// use async_trait::async_trait;
/// use pubfetch::{error::Result, EntrezClient};
///
/// struct Canned(&'static str);
///
/// #[async_trait]
/// impl EntrezClient for Canned {
///   async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<String>> {
///     Ok(vec!["1".to_string()])
///   }
///
///   async fn fetch_details(&self, _ids: &[String]) -> Result<Vec<u8>> {
///     Ok(self.0.as_bytes().to_vec())
///   }
/// }
/// ```
#[async_trait]
pub trait EntrezClient: Send + Sync {
  /// Runs a search and returns at most `max_results` identifiers in relevance order.
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

  /// Fetches the raw XML detail document for all `ids` in a single request.
  async fn fetch_details(&self, ids: &[String]) -> Result<Vec<u8>>;
}

/// [`EntrezClient`] backed by `reqwest`.
///
/// No timeout is configured, so a stalled server can block a call indefinitely.
#[derive(Debug, Clone)]
pub struct HttpEntrez {
  /// Shared HTTP connection pool
  client: reqwest::Client,
  /// Endpoint, database, format and header settings
  config: FetcherConfig,
}

impl HttpEntrez {
  /// Creates a client for the endpoints described by `config`.
  ///
  /// # Errors
  ///
  /// Returns [`PubfetchError::Config`] if `config` fails validation.
  pub fn new(config: FetcherConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self { client: reqwest::Client::new(), config })
  }

  /// Sends a GET request and returns the body of a successful response.
  async fn get(
    &self,
    endpoint: &'static str,
    url: &str,
    params: &[(&str, &str)],
  ) -> Result<Vec<u8>> {
    debug!("Requesting {endpoint} via {url} with {params:?}");

    let mut request = self.client.get(url).query(params);
    for (key, value) in &self.config.headers {
      request = request.header(key, value);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(PubfetchError::HttpStatus { endpoint, status: status.as_u16() });
    }

    let data = response.bytes().await?;
    trace!("{endpoint} response: {}", String::from_utf8_lossy(&data));
    Ok(data.to_vec())
  }
}

#[async_trait]
impl EntrezClient for HttpEntrez {
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
    let retmax = max_results.to_string();
    let params = [
      ("db", self.config.database.as_str()),
      ("term", query),
      ("retmax", retmax.as_str()),
      ("retmode", self.config.search_format.retmode()),
    ];
    let data = self.get("esearch", &self.config.search_url(), &params).await?;
    let mut ids = response::parse_search(self.config.search_format, &data)?;
    ids.truncate(max_results);
    Ok(ids)
  }

  async fn fetch_details(&self, ids: &[String]) -> Result<Vec<u8>> {
    let id = ids.join(",");
    let params = [("db", self.config.database.as_str()), ("id", id.as_str()), ("retmode", "xml")];
    self.get("efetch", &self.config.fetch_url(), &params).await
  }
}

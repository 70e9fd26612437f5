//! The search-then-fetch pipeline.
//!
//! A [`Fetcher`] runs one query as a strictly sequential chain:
//!
//! 1. [`Fetcher::search`] asks for at most `max_results` identifiers
//! 2. [`Fetcher::fetch_details`] downloads every matching article in one request
//! 3. [`Fetcher::classify`] turns each article entry into a [`Record`]
//!
//! An empty search result ends the chain early: no detail request is made and an empty list is
//! returned. Any failure aborts the whole run; there is no retry and no partial result.

use super::*;

/// Runs queries against an [`EntrezClient`] and classifies the results.
#[derive(Debug, Clone)]
pub struct Fetcher<C> {
  /// Network seam
  client:      C,
  /// Compiled keyword sets
  classifier:  Classifier,
  /// Cap passed to every search
  max_results: usize,
}

impl Fetcher<HttpEntrez> {
  /// Creates a fetcher that talks to E-utilities over HTTP.
  pub fn from_config(config: FetcherConfig) -> Result<Self> {
    let classifier = Classifier::new(&config.keywords)?;
    let max_results = config.max_results;
    Ok(Self { client: HttpEntrez::new(config)?, classifier, max_results })
  }
}

impl<C: EntrezClient> Fetcher<C> {
  /// Creates a fetcher around any [`EntrezClient`], taking keywords and the result cap from
  /// `config`.
  pub fn new(client: C, config: &FetcherConfig) -> Result<Self> {
    config.validate()?;
    let classifier = Classifier::new(&config.keywords)?;
    Ok(Self { client, classifier, max_results: config.max_results })
  }

  /// The client this fetcher sends requests through.
  pub fn client(&self) -> &C { &self.client }

  /// Searches for `query` and returns the matching identifiers, possibly none.
  pub async fn search(&self, query: &str) -> Result<Vec<String>> {
    debug!("Searching for {query:?} (max {} results)", self.max_results);
    self.client.search(query, self.max_results).await
  }

  /// Downloads and parses the article entries for `ids`, in source order.
  ///
  /// An empty `ids` slice returns immediately without a request.
  pub async fn fetch_details(&self, ids: &[String]) -> Result<Vec<Element>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    debug!("Fetching details for {} identifiers", ids.len());
    let data = self.client.fetch_details(ids).await?;
    let articles = response::parse_articles(&data)?;
    if articles.len() != ids.len() {
      warn!("Requested {} articles but received {}", ids.len(), articles.len());
    }
    Ok(articles)
  }

  /// Classifies one article entry.
  pub fn classify(&self, article: &Element) -> Result<Record> { self.classifier.classify(article) }

  /// Runs the full pipeline for `query`.
  ///
  /// Returns an empty list, without a detail request, when the search matches nothing.
  pub async fn fetch_papers(&self, query: &str) -> Result<Vec<Record>> {
    let ids = self.search(query).await?;
    if ids.is_empty() {
      debug!("No identifiers found for {query:?}, skipping detail fetch");
      return Ok(Vec::new());
    }

    self.fetch_details(&ids).await?.iter().map(|article| self.classify(article)).collect()
  }
}

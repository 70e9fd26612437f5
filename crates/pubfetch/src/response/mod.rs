//! Parsing of E-utilities responses.
//!
//! The search endpoint can answer in either XML or JSON depending on
//! [`SearchFormat`]; both are reduced to an ordered list of identifiers. The detail endpoint
//! always answers in XML, which is read into an [`Element`] tree so that classification can walk
//! it without touching the network.

use super::*;

pub mod json;
pub mod xml;

/// Extracts the ordered identifier list from a search response.
///
/// # Errors
///
/// Returns an error if the payload is malformed, is not a search result at all, or carries an
/// API error message.
pub fn parse_search(format: SearchFormat, data: &[u8]) -> Result<Vec<String>> {
  let ids = match format {
    SearchFormat::Xml => xml::parse_search_ids(data)?,
    SearchFormat::Json => json::parse_search_ids(data)?,
  };
  debug!("Search response yielded {} identifiers", ids.len());
  Ok(ids)
}

/// Reads a detail response and returns its `<PubmedArticle>` entries in document order.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML, if E-utilities reported an
/// `<ERROR>`, or if the document has no `<PubmedArticleSet>` root.
pub fn parse_articles(data: &[u8]) -> Result<Vec<Element>> {
  let document = xml::parse_document(data)?;

  if let Some(error) = document.find("ERROR") {
    return Err(PubfetchError::ApiError(error.text()));
  }

  let set = document
    .find("PubmedArticleSet")
    .ok_or(PubfetchError::MissingElement("PubmedArticleSet"))?;
  let articles: Vec<Element> = set.find_all("PubmedArticle").into_iter().cloned().collect();
  debug!("Detail response contained {} articles", articles.len());
  Ok(articles)
}

//! JSON search responses (`retmode=json`).
//!
//! ```json
//! { "header": { "type": "esearch" },
//!   "esearchresult": { "count": "2", "retmax": "2", "idlist": ["39000001", "39000002"] } }
//! ```

use super::*;

/// Top level of an `esearch` JSON answer.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
  /// The search result proper
  esearchresult: Option<SearchResult>,
  /// Service level failures such as rate limiting are reported here
  error:         Option<String>,
}

/// The `esearchresult` object.
#[derive(Debug, Deserialize)]
struct SearchResult {
  /// Total number of matches, as a string
  count:  Option<String>,
  /// Identifiers of the returned page of matches
  #[serde(default)]
  idlist: Vec<String>,
  /// Query level failures
  #[serde(rename = "ERROR")]
  error:  Option<String>,
}

/// Extracts identifiers from an `esearch` JSON response.
///
/// # Errors
///
/// Returns [`PubfetchError::Json`] if the body is not valid JSON of the expected shape,
/// [`PubfetchError::ApiError`] if either error field is set, and
/// [`PubfetchError::MissingElement`] if there is no `esearchresult` object.
pub fn parse_search_ids(data: &[u8]) -> Result<Vec<String>> {
  trace!("Parsing JSON search response: {}", String::from_utf8_lossy(data));
  let envelope: SearchEnvelope = serde_json::from_slice(data)?;

  if let Some(error) = envelope.error {
    return Err(PubfetchError::ApiError(error));
  }
  let result = envelope.esearchresult.ok_or(PubfetchError::MissingElement("esearchresult"))?;
  if let Some(error) = result.error {
    return Err(PubfetchError::ApiError(error));
  }
  if let Some(count) = &result.count {
    debug!("Search matched {count} records in total");
  }

  Ok(result.idlist.into_iter().filter(|id| !id.trim().is_empty()).collect())
}

//! Configuration for the search-then-fetch pipeline.
//!
//! Every value the pipeline depends on (endpoint, database, result cap, keyword sets) lives in
//! [`FetcherConfig`] so that tests and alternative deployments can swap them out. Configurations
//! are plain TOML and every key is optional:
//!
//! ```toml
//! base_url      = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/"
//! database      = "pubmed"
//! max_results   = 10
//! search_format = "xml"
//!
//! [headers]
//! User-Agent = "pubfetch/0.1"
//!
//! [keywords]
//! company           = ["inc", "ltd", "gmbh", "corp", "biotech", "pharma", "llc", "corporation"]
//! academic          = ["university", "college", "institute", "school"]
//! academic_acronyms = ["MIT"]
//! ```

use super::*;

/// Default E-utilities base URL.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

/// Default number of identifiers requested from the search endpoint.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Substrings that flag an affiliation as commercial.
pub const DEFAULT_COMPANY_KEYWORDS: [&str; 8] =
  ["inc", "ltd", "gmbh", "corp", "biotech", "pharma", "llc", "corporation"];

/// Substrings that flag an affiliation as academic.
pub const DEFAULT_ACADEMIC_KEYWORDS: [&str; 4] = ["university", "college", "institute", "school"];

/// Whole-word, case-sensitive names that flag an affiliation as academic.
pub const DEFAULT_ACADEMIC_ACRONYMS: [&str; 1] = ["MIT"];

/// Complete configuration for a [`Fetcher`](crate::fetcher::Fetcher).
///
/// # Examples
///
/// ```
/// use pubfetch::{FetcherConfig, SearchFormat};
///
/// let config = FetcherConfig::from_toml_str(
///   r#"
///     max_results = 5
///     search_format = "json"
///   "#,
/// )
/// .unwrap();
/// assert_eq!(config.max_results, 5);
/// assert_eq!(config.search_format, SearchFormat::Json);
/// assert_eq!(config.database, "pubmed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetcherConfig {
  /// Base URL that `esearch.fcgi` and `efetch.fcgi` are resolved against
  pub base_url:      String,
  /// E-utilities database name
  pub database:      String,
  /// Cap on the number of identifiers requested from the search endpoint
  pub max_results:   usize,
  /// Response format requested from the search endpoint
  pub search_format: SearchFormat,
  /// Extra HTTP headers sent with every request
  pub headers:       BTreeMap<String, String>,
  /// Keyword sets used to classify affiliations
  pub keywords:      KeywordConfig,
}

/// Response format requested from the search endpoint.
///
/// The detail endpoint always returns XML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFormat {
  /// `retmode=xml`, identifiers read from `<IdList><Id>`
  #[default]
  Xml,
  /// `retmode=json`, identifiers read from `esearchresult.idlist`
  Json,
}

/// Keyword sets used by the [`Classifier`].
///
/// `company` and `academic` match as case-insensitive substrings. `academic_acronyms` match only
/// as whole words with exact case, so `MIT` does not fire inside "Smith" or "committee". An empty
/// set never matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordConfig {
  /// Keywords marking an affiliation as a company; checked first
  pub company:           Vec<String>,
  /// Keywords marking an affiliation as academic
  pub academic:          Vec<String>,
  /// Acronyms marking an affiliation as academic
  pub academic_acronyms: Vec<String>,
}

impl Default for FetcherConfig {
  fn default() -> Self {
    Self {
      base_url:      DEFAULT_BASE_URL.to_string(),
      database:      "pubmed".to_string(),
      max_results:   DEFAULT_MAX_RESULTS,
      search_format: SearchFormat::default(),
      headers:       BTreeMap::new(),
      keywords:      KeywordConfig::default(),
    }
  }
}

impl Default for KeywordConfig {
  fn default() -> Self {
    Self {
      company:           DEFAULT_COMPANY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
      academic:          DEFAULT_ACADEMIC_KEYWORDS.iter().map(|k| k.to_string()).collect(),
      academic_acronyms: DEFAULT_ACADEMIC_ACRONYMS.iter().map(|k| k.to_string()).collect(),
    }
  }
}

impl SearchFormat {
  /// Value of the `retmode` query parameter for this format.
  pub fn retmode(&self) -> &'static str {
    match self {
      SearchFormat::Xml => "xml",
      SearchFormat::Json => "json",
    }
  }
}

impl FetcherConfig {
  /// Parses and validates a configuration from a TOML string.
  ///
  /// Missing keys take their default values.
  ///
  /// # Errors
  ///
  /// Returns [`PubfetchError::TomlDe`] for malformed TOML or unknown keys, and
  /// [`PubfetchError::Config`] if the parsed values fail [`FetcherConfig::validate`].
  pub fn from_toml_str(toml_str: &str) -> Result<Self> {
    let config: FetcherConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a configuration file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Checks the values that serde cannot.
  ///
  /// # Errors
  ///
  /// Returns [`PubfetchError::Config`] when:
  /// - `base_url` is not an absolute URL
  /// - `database` is empty
  /// - `max_results` is zero
  pub fn validate(&self) -> Result<()> {
    reqwest::Url::parse(&self.base_url)
      .map_err(|e| PubfetchError::Config(format!("Invalid base_url {:?}: {e}", self.base_url)))?;
    if self.database.trim().is_empty() {
      return Err(PubfetchError::Config("database must not be empty".to_string()));
    }
    if self.max_results == 0 {
      return Err(PubfetchError::Config("max_results must be at least 1".to_string()));
    }
    Ok(())
  }

  /// Full URL of the search endpoint.
  pub fn search_url(&self) -> String { self.endpoint("esearch.fcgi") }

  /// Full URL of the detail endpoint.
  pub fn fetch_url(&self) -> String { self.endpoint("efetch.fcgi") }

  /// Joins an endpoint name onto the base URL regardless of its trailing slash.
  fn endpoint(&self, name: &str) -> String {
    format!("{}/{}", self.base_url.trim_end_matches('/'), name)
  }
}

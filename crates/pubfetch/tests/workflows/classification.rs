//! Offline pipeline runs against fabricated E-utilities documents.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pubfetch::error::Result as PubfetchResult;

use super::*;

/// Serves the fixture documents and counts detail requests.
struct Fixtures {
  ids:          Vec<String>,
  detail_calls: AtomicUsize,
}

impl Fixtures {
  fn new(ids: &[&str]) -> Self {
    Self { ids: ids.iter().map(|id| id.to_string()).collect(), detail_calls: AtomicUsize::new(0) }
  }
}

#[async_trait]
impl EntrezClient for Fixtures {
  async fn search(&self, _query: &str, max_results: usize) -> PubfetchResult<Vec<String>> {
    Ok(self.ids.iter().take(max_results).cloned().collect())
  }

  async fn fetch_details(&self, _ids: &[String]) -> PubfetchResult<Vec<u8>> {
    self.detail_calls.fetch_add(1, Ordering::SeqCst);
    Ok(EFETCH_XML.as_bytes().to_vec())
  }
}

#[tokio::test]
async fn test_company_and_academic_articles() -> TestResult<()> {
  let fetcher = Fetcher::new(Fixtures::new(&["39000001", "39000002"]), &FetcherConfig::default())?;
  let records = fetcher.fetch_papers("cancer immunotherapy").await?;

  assert_eq!(records.len(), 2);

  let company = records[0].to_row();
  assert_eq!(company[0], "39000001");
  assert_eq!(company[1], "Engineered T cells for solid tumours.");
  assert_eq!(company[2], "2024");
  assert_eq!(company[3], NOT_AVAILABLE);
  assert_eq!(company[4], "Acme Biotech Inc.");
  assert_eq!(company[5], "c.okafor@acmebio.example");

  let academic = records[1].to_row();
  assert_eq!(academic[0], "39000002");
  assert_eq!(academic[2], "2023");
  assert_eq!(academic[3], NOT_AVAILABLE);
  assert_eq!(academic[4], NOT_AVAILABLE);
  assert_eq!(academic[5], "rpatel@mit.example");

  assert_eq!(fetcher.client().detail_calls.load(Ordering::SeqCst), 1);
  Ok(())
}

#[tokio::test]
async fn test_empty_search_never_fetches_details() -> TestResult<()> {
  let fetcher = Fetcher::new(Fixtures::new(&[]), &FetcherConfig::default())?;
  let records = fetcher.fetch_papers("zzqxv").await?;

  assert!(records.is_empty());
  assert_eq!(fetcher.client().detail_calls.load(Ordering::SeqCst), 0);
  Ok(())
}

#[tokio::test]
async fn test_export_matches_fixture() -> TestResult<()> {
  let fetcher = Fetcher::new(Fixtures::new(&["39000001", "39000002"]), &FetcherConfig::default())?;
  let records: Vec<Record> = fetcher.fetch_papers("cancer immunotherapy").await?;

  let dir = tempdir()?;
  let path = dir.path().join("result.csv");
  export(&records, &path)?;

  let expected = "\
PubmedID,Title,Publication Date,Non-Academic Authors,Company Affiliations,Corresponding Author Email
39000001,Engineered T cells for solid tumours.,2024,N/A,Acme Biotech Inc.,c.okafor@acmebio.example
39000002,Checkpoint blockade outcomes in a retrospective cohort.,2023,N/A,N/A,rpatel@mit.example
";
  assert_eq!(std::fs::read_to_string(&path)?, expected);

  let mut in_memory = Vec::new();
  write_records(&records, &mut in_memory)?;
  assert_eq!(String::from_utf8(in_memory)?, expected);
  Ok(())
}

#[tokio::test]
async fn test_custom_keywords_reclassify() -> TestResult<()> {
  let config: FetcherConfig = FetcherConfig::from_toml_str(
    r#"
      [keywords]
      company = ["mit"]
      academic = []
    "#,
  )?;
  let fetcher = Fetcher::new(Fixtures::new(&["39000001", "39000002"]), &config)?;
  let records = fetcher.fetch_papers("anything").await?;

  // "Acme Biotech Inc." no longer matches a company keyword and there is no academic set
  assert_eq!(records[0].non_academic_authors, vec!["Chidi Okafor"]);
  assert!(records[0].company_affiliations.is_empty());
  assert_eq!(records[1].company_affiliations, vec!["MIT"]);
  Ok(())
}

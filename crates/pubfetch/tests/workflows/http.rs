//! `HttpEntrez` against a local mock E-utilities server.

use mockito::{Matcher, Server};
use pubfetch::HttpEntrez;

use super::*;

fn search_query(term: &str, retmode: &str) -> Matcher {
  Matcher::AllOf(vec![
    Matcher::UrlEncoded("db".into(), "pubmed".into()),
    Matcher::UrlEncoded("term".into(), term.into()),
    Matcher::UrlEncoded("retmax".into(), "10".into()),
    Matcher::UrlEncoded("retmode".into(), retmode.into()),
  ])
}

fn fetch_query(ids: &str) -> Matcher {
  Matcher::AllOf(vec![
    Matcher::UrlEncoded("db".into(), "pubmed".into()),
    Matcher::UrlEncoded("id".into(), ids.into()),
    Matcher::UrlEncoded("retmode".into(), "xml".into()),
  ])
}

#[tokio::test]
async fn test_xml_search_then_single_fetch() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(search_query("cancer immunotherapy", "xml"))
    .with_status(200)
    .with_header("content-type", "text/xml; charset=UTF-8")
    .with_body(ESEARCH_XML)
    .expect(1)
    .create_async()
    .await;
  let fetch = server
    .mock("GET", "/efetch.fcgi")
    .match_query(fetch_query("39000001,39000002"))
    .with_status(200)
    .with_header("content-type", "text/xml; charset=UTF-8")
    .with_body(EFETCH_XML)
    .expect(1)
    .create_async()
    .await;

  let fetcher = Fetcher::from_config(mock_config(&server.url(), SearchFormat::Xml))?;
  let records = fetcher.fetch_papers("cancer immunotherapy").await?;

  search.assert_async().await;
  fetch.assert_async().await;
  let ids: Vec<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
  assert_eq!(ids, vec!["39000001", "39000002"]);
  assert_eq!(records[0].company_affiliations, vec!["Acme Biotech Inc."]);
  Ok(())
}

#[tokio::test]
async fn test_json_search() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(search_query("cancer immunotherapy", "json"))
    .with_status(200)
    .with_header("content-type", "application/json; charset=UTF-8")
    .with_body(ESEARCH_JSON)
    .create_async()
    .await;

  let client = HttpEntrez::new(mock_config(&server.url(), SearchFormat::Json))?;
  let ids = client.search("cancer immunotherapy", 10).await?;

  search.assert_async().await;
  assert_eq!(ids, vec!["39000001", "39000002"]);
  Ok(())
}

#[tokio::test]
async fn test_search_is_capped() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let _search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(Matcher::UrlEncoded("retmax".into(), "1".into()))
    .with_body(ESEARCH_XML)
    .create_async()
    .await;

  let client = HttpEntrez::new(mock_config(&server.url(), SearchFormat::Xml))?;
  // The server ignores retmax and returns two ids anyway
  assert_eq!(client.search("q", 1).await?, vec!["39000001"]);
  Ok(())
}

#[tokio::test]
async fn test_empty_search_sends_no_fetch() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let _search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(Matcher::Any)
    .with_body(ESEARCH_EMPTY_XML)
    .create_async()
    .await;
  let fetch = server
    .mock("GET", "/efetch.fcgi")
    .match_query(Matcher::Any)
    .expect(0)
    .create_async()
    .await;

  let fetcher = Fetcher::from_config(mock_config(&server.url(), SearchFormat::Xml))?;
  assert!(fetcher.fetch_papers("zzqxv").await?.is_empty());
  fetch.assert_async().await;
  Ok(())
}

#[tokio::test]
async fn test_http_error_status() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let _search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(Matcher::Any)
    .with_status(429)
    .with_body(r#"{"error":"API rate limit exceeded"}"#)
    .create_async()
    .await;

  let fetcher = Fetcher::from_config(mock_config(&server.url(), SearchFormat::Xml))?;
  match fetcher.fetch_papers("q").await {
    Err(PubfetchError::HttpStatus { endpoint, status }) => {
      assert_eq!(endpoint, "esearch");
      assert_eq!(status, 429);
    },
    other => panic!("expected HTTP status error, got {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn test_detail_error_payload() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let _search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(Matcher::Any)
    .with_body(ESEARCH_XML)
    .create_async()
    .await;
  let _fetch = server
    .mock("GET", "/efetch.fcgi")
    .match_query(Matcher::Any)
    .with_body("<eFetchResult><ERROR>Cannot retrieve history data</ERROR></eFetchResult>")
    .create_async()
    .await;

  let fetcher = Fetcher::from_config(mock_config(&server.url(), SearchFormat::Xml))?;
  let result = fetcher.fetch_papers("q").await;
  assert!(matches!(result, Err(PubfetchError::ApiError(m)) if m == "Cannot retrieve history data"));
  Ok(())
}

#[tokio::test]
async fn test_headers_are_sent() -> TestResult<()> {
  let mut server = Server::new_async().await;
  let search = server
    .mock("GET", "/esearch.fcgi")
    .match_query(Matcher::Any)
    .match_header("user-agent", "pubfetch-tests/1.0")
    .with_body(ESEARCH_EMPTY_XML)
    .create_async()
    .await;

  let mut config = mock_config(&server.url(), SearchFormat::Xml);
  config.headers.insert("User-Agent".to_string(), "pubfetch-tests/1.0".to_string());
  let client = HttpEntrez::new(config)?;
  assert!(client.search("q", 10).await?.is_empty());
  search.assert_async().await;
  Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() -> TestResult<()> {
  // Nothing listens on port 1
  let fetcher = Fetcher::from_config(mock_config("http://127.0.0.1:1", SearchFormat::Xml))?;
  let result = fetcher.fetch_papers("q").await;
  assert!(matches!(result, Err(PubfetchError::Network(_))));
  Ok(())
}

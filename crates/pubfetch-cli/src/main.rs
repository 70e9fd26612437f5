//! Command line front end for the pubfetch library.
//!
//! `get-papers-list` searches PubMed for a query, screens the author affiliations of every
//! matching article and writes one CSV row per article, listing its company affiliations and
//! non-academic authors (`N/A` when there are none).
//!
//! # Usage
//!
//! ```bash
//! # Write up to ten matching articles to result.csv
//! get-papers-list "cancer immunotherapy"
//!
//! # Choose the output file and show full error details
//! get-papers-list "crispr off-target" -f crispr.csv -d
//!
//! # Use a custom endpoint, result cap or keyword set
//! get-papers-list "heart failure" -c pubmed.toml
//! ```
//!
//! The process exits with status 0 even when the run fails; the outcome is only reported on
//! stdout and stderr.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  error::Error as _,
  path::{Path, PathBuf},
};

use clap::Parser;
use console::style;
use pubfetch::{export::export, fetcher::Fetcher, FetcherConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod error;

use crate::error::*;

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";

/// Message shown for any failure when `--debug` is off
static GENERIC_ERROR: &str = "An error occurred while fetching papers. Re-run with -d for details.";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(
  name = "get-papers-list",
  version,
  about = "Search PubMed and export the author affiliations of each paper as CSV"
)]
pub struct Cli {
  /// PubMed search query
  query: String,

  /// File to write the results to
  #[arg(short, long, default_value = "result.csv")]
  file: PathBuf,

  /// Print full error details and enable debug logging
  #[arg(short, long)]
  debug: bool,

  /// TOML configuration overriding the endpoint, result cap and keyword sets
  #[arg(short, long)]
  config: Option<PathBuf>,
}

/// What a successful run did.
enum Outcome {
  /// The search matched nothing and no file was written
  NoResults,
  /// Records were written to the given path
  Saved(PathBuf),
}

/// Configures the logging system.
///
/// `RUST_LOG` takes precedence; otherwise `--debug` selects `debug` and the default is `warn`.
/// Logs go to stderr so they never mix with the result messages.
fn setup_logging(debug: bool) {
  let filter = if debug { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(true)
    .init();
}

/// Loads the configuration named on the command line, or the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<FetcherConfig> {
  match path {
    Some(path) => FetcherConfig::from_file(path)
      .map_err(|source| CliError::Config { path: path.to_path_buf(), source }),
    None => Ok(FetcherConfig::default()),
  }
}

/// Runs the search, fetch, classify and export chain for one query.
async fn run(cli: &Cli) -> Result<Outcome> {
  let config = load_config(cli.config.as_deref())?;
  let fetcher = Fetcher::from_config(config)?;

  let records = fetcher.fetch_papers(&cli.query).await?;
  if records.is_empty() {
    return Ok(Outcome::NoResults);
  }

  debug!("Writing {} records", records.len());
  export(&records, &cli.file)?;
  Ok(Outcome::Saved(cli.file.clone()))
}

/// Formats an error and every error in its source chain, one per line.
fn error_chain(error: &CliError) -> String {
  let mut message = error.to_string();
  let mut source = error.source();
  while let Some(cause) = source {
    message.push_str(&format!("\n  caused by: {cause}"));
    source = cause.source();
  }
  message
}

/// Entry point for `get-papers-list`.
#[tokio::main(flavor = "current_thread")]
async fn main() {
  let cli = Cli::parse();
  setup_logging(cli.debug);

  match run(&cli).await {
    Ok(Outcome::Saved(path)) =>
      println!("{} Results saved to {}", style(SUCCESS_PREFIX).green(), path.display()),
    Ok(Outcome::NoResults) => println!("{} No results found.", style(INFO_PREFIX).blue()),
    Err(e) if cli.debug => eprintln!("{} Error: {}", style(ERROR_PREFIX).red(), error_chain(&e)),
    Err(_) => eprintln!("{} Error: {GENERIC_ERROR}", style(ERROR_PREFIX).red()),
  }
}

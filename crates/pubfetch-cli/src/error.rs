//! Error types for the `get-papers-list` binary.

use std::path::PathBuf;

use pubfetch::error::PubfetchError;
use thiserror::Error;

/// Error type alias used by the command line front end.
pub type Result<T> = core::result::Result<T, CliError>;

/// Failures surfaced to the user by `get-papers-list`.
#[derive(Error, Debug)]
pub enum CliError {
  /// The file given with `--config` could not be loaded.
  #[error("Failed to load configuration from {}", path.display())]
  Config {
    /// Path passed on the command line
    path:   PathBuf,
    /// What went wrong while reading or validating it
    #[source]
    source: PubfetchError,
  },

  /// Searching, fetching, classifying or exporting failed.
  #[error(transparent)]
  Pubfetch(#[from] PubfetchError),
}

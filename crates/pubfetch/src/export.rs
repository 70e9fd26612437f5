//! CSV export of classified records.
//!
//! The file always starts with [`CSV_HEADER`] followed by one row per record in input order.
//! List fields are joined with [`LIST_DELIMITER`](crate::record::LIST_DELIMITER) (`"; "`) and
//! exported as `N/A` when empty.
//! Quoting of commas, quotes and newlines inside fields is left to the `csv` writer.

use super::*;
use crate::record::CSV_HEADER;

/// Writes `records` to `path`, replacing any existing file.
///
/// The write is not atomic: a failure part way leaves a truncated file behind.
///
/// # Errors
///
/// Returns [`PubfetchError::Csv`] if the file cannot be created or written.
pub fn export(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  debug!("Exporting {} records to {}", records.len(), path.display());
  let mut writer = csv::Writer::from_path(path)?;
  write_rows(&mut writer, records)
}

/// Writes the header and `records` as CSV to any writer.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<()> {
  write_rows(&mut csv::Writer::from_writer(writer), records)
}

/// Shared body of [`export`] and [`write_records`].
fn write_rows<W: Write>(writer: &mut csv::Writer<W>, records: &[Record]) -> Result<()> {
  writer.write_record(CSV_HEADER)?;
  for record in records {
    writer.write_record(record.to_row())?;
  }
  writer.flush()?;
  Ok(())
}

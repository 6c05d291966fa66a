//! CSV export of the yearly corpus history, one row per projected year

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{PensionError, PensionResult};
use crate::projection::CorpusHistory;

/// Write the history to a CSV file at `path`
pub fn write_csv<P: AsRef<Path>>(history: &CorpusHistory, path: P) -> PensionResult<()> {
    let path = path.as_ref();
    // Leave any existing file untouched when there is nothing to write
    if history.is_empty() {
        return Err(PensionError::EmptyHistory);
    }
    let file = File::create(path)?;
    write_csv_to(history, file)?;
    log::info!("Corpus history saved to {}", path.display());
    Ok(())
}

/// Write the history as CSV to any writer. Columns follow the snapshot field order.
pub fn write_csv_to<W: Write>(history: &CorpusHistory, writer: W) -> PensionResult<()> {
    if history.is_empty() {
        return Err(PensionError::EmptyHistory);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in history {
        csv_writer.serialize(snapshot)?;
    }
    csv_writer.flush()?;
    Ok(())
}

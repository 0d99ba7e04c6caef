use crate::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Conventional export filename for one season's ranking.
pub fn default_export_path(year: u16) -> String {
    format!("nba_mvp_{year}.csv")
}

/// Writes the ranked table as a flat CSV: header row, no index column,
/// truncating any previous run's file.
pub fn write_csv<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

//! CSV decoding of exported ledger spreadsheets

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use crate::traits::*;
use crate::types::*;

/// Decode delimited text with a header row into a [`Table`]
///
/// Rows may be shorter or longer than the header; missing cells read as blank.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> AnalysisResult<Table> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    debug!("Decoded {} rows across {} columns", rows.len(), headers.len());
    Ok(Table::new(headers, rows))
}

/// Table source reading a CSV export from disk
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSource {
    /// Comma-delimited file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    /// Use another delimiter, e.g. `b';'` for pt-BR spreadsheet exports
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl TableSource for CsvSource {
    fn load_table(&self) -> AnalysisResult<Table> {
        debug!("Reading {}", self.path.display());
        let file = File::open(&self.path)?;
        read_table(file, self.delimiter)
    }
}

//! Traits for input abstraction

use crate::types::*;

/// Source of a decoded spreadsheet
///
/// This trait lets the analyses run over any input (a CSV export, rows built
/// in code, a workbook reader) without knowing how the table was decoded.
/// Each analysis call loads the table afresh and never mutates it.
pub trait TableSource {
    /// Load the full table with its header row
    fn load_table(&self) -> AnalysisResult<Table>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn load_table(&self) -> AnalysisResult<Table> {
        (**self).load_table()
    }
}

impl TableSource for Table {
    fn load_table(&self) -> AnalysisResult<Table> {
        Ok(self.clone())
    }
}

//! In-memory table source for testing

use crate::traits::*;
use crate::types::*;

/// Table source backed by rows built in code, for tests and demos
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MemorySource {
    /// Create a source with the given column names and no rows
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells read as blank
    pub fn with_row(mut self, cells: &[&str]) -> Self {
        self.push_row(cells);
        self
    }

    pub fn push_row(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }
}

impl TableSource for MemorySource {
    fn load_table(&self) -> AnalysisResult<Table> {
        Ok(Table::new(self.headers.clone(), self.rows.clone()))
    }
}

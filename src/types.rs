//! Core types and data structures for the analysis system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw amount cell as it comes out of a spreadsheet
///
/// Numeric cells are already exact; text cells use the Brazilian locale
/// convention (`.` thousands separator, `,` decimal separator) and must go
/// through [`crate::utils::parse_amount`] before any arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawAmount {
    /// Already numeric value
    Number(BigDecimal),
    /// Locale-formatted text, e.g. `"1.500,00"`
    Text(String),
}

impl From<BigDecimal> for RawAmount {
    fn from(value: BigDecimal) -> Self {
        RawAmount::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

/// A single ledger row relevant to ND reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// ND identifier of the pending advance note
    pub nd: String,
    /// Parsed amount of the row
    pub amount: BigDecimal,
    /// Party that requested the advance (Solicitante)
    pub requester: String,
    /// Date the receipt came in; `None` means the entry is still outstanding
    pub receipt_date: Option<NaiveDate>,
}

impl LedgerEntry {
    /// Create a new ledger entry
    pub fn new(
        nd: String,
        amount: BigDecimal,
        requester: String,
        receipt_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            nd,
            amount,
            requester,
            receipt_date,
        }
    }

    /// Create an entry that has not been received yet
    pub fn outstanding(nd: String, amount: BigDecimal, requester: String) -> Self {
        Self::new(nd, amount, requester, None)
    }

    /// Whether the entry still awaits reconciliation
    pub fn is_outstanding(&self) -> bool {
        self.receipt_date.is_none()
    }
}

/// A single payment row relevant to the provider ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Category label; `None` when the cell is blank
    pub category: Option<String>,
    /// Provider identity (Nome)
    pub provider: String,
    /// Signed amount paid
    pub amount: BigDecimal,
}

impl PaymentRow {
    /// Create a new payment row
    pub fn new(category: Option<String>, provider: String, amount: BigDecimal) -> Self {
        Self {
            category,
            provider,
            amount,
        }
    }
}

/// A decoded spreadsheet: named columns over rows of raw text cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table, trimming surrounding whitespace from column names
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    /// Column names in order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> AnalysisResult<usize> {
        let wanted = name.trim();
        self.headers
            .iter()
            .position(|h| h == wanted)
            .ok_or_else(|| AnalysisError::MissingColumn(wanted.to_string()))
    }

    /// Cell value at `row`/`column`, or `None` when blank or missing
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}

/// Errors that can occur while running an analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid amount: {0:?}")]
    Parse(String),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Search budget exhausted after {visits} branch visits")]
    SearchBudgetExceeded { visits: u64 },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

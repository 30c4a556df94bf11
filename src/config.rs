//! Analysis configuration: Top-N choices, column names, search limits

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::ranking::DEFAULT_CATEGORY_FILTER;
use crate::types::*;
use crate::utils::validation::{validate_category_filter, validate_tolerance};

/// How many providers a ranking returns
///
/// Only the fixed set offered to users is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum TopN {
    #[default]
    Five,
    Ten,
    Twenty,
    Fifty,
}

impl TopN {
    /// Every selectable value, in menu order
    pub const ALL: [TopN; 4] = [TopN::Five, TopN::Ten, TopN::Twenty, TopN::Fifty];

    pub fn count(self) -> usize {
        match self {
            TopN::Five => 5,
            TopN::Ten => 10,
            TopN::Twenty => 20,
            TopN::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for TopN {
    type Error = AnalysisError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        TopN::ALL
            .into_iter()
            .find(|n| n.count() == value)
            .ok_or_else(|| {
                AnalysisError::Validation(format!(
                    "Top N must be one of 5, 10, 20 or 50, got {}",
                    value
                ))
            })
    }
}

impl From<TopN> for usize {
    fn from(value: TopN) -> Self {
        value.count()
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Column names of the payments sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentColumns {
    pub provider: String,
    pub amount: String,
    pub category: String,
}

impl Default for PaymentColumns {
    fn default() -> Self {
        Self {
            provider: "Nome".to_string(),
            amount: "Valor categoria/centro de custo".to_string(),
            category: "Categoria".to_string(),
        }
    }
}

/// Column names of the ND ledger sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerColumns {
    pub amount: String,
    pub receipt_date: String,
    pub requester: String,
    pub nd: String,
}

impl Default for LedgerColumns {
    fn default() -> Self {
        Self {
            amount: "valor".to_string(),
            receipt_date: "DT Recebimento".to_string(),
            requester: "Solicitante".to_string(),
            nd: "ND".to_string(),
        }
    }
}

/// Column names for both analyses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub payments: PaymentColumns,
    pub ledger: LedgerColumns,
}

fn default_tolerance() -> BigDecimal {
    BigDecimal::from(1) / BigDecimal::from(100_000)
}

/// Settings shared by every analysis run
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Case-insensitive substring a category must contain to be ranked
    pub category_filter: String,
    /// Ranking length
    pub top_n: TopN,
    /// Absolute tolerance for a subset sum to count as matching the target
    pub tolerance: BigDecimal,
    /// Upper bound on search branch visits; `None` searches exhaustively
    pub max_visits: Option<u64>,
    pub columns: ColumnMap,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            category_filter: DEFAULT_CATEGORY_FILTER.to_string(),
            top_n: TopN::default(),
            tolerance: default_tolerance(),
            max_visits: None,
            columns: ColumnMap::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> AnalysisResult<Self> {
        let config: AnalysisConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        validate_category_filter(&self.category_filter)?;
        validate_tolerance(&self.tolerance)?;
        if self.max_visits == Some(0) {
            return Err(AnalysisError::Validation(
                "max_visits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

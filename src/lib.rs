//! # Ledger Analysis
//!
//! Analyses over exported finance spreadsheets: ranking service providers by
//! total amount paid, and reconciling outstanding ND (advance note) entries
//! against a target value.
//!
//! ## Features
//!
//! - **Locale amounts**: exact parsing of `1.500,00`-style text and `R$` formatting
//! - **Top providers**: category-filtered, grouped and ranked spend per provider
//! - **ND reconciliation**: depth-first subset-sum search with deterministic order
//! - **Input abstraction**: CSV exports or in-memory tables behind one trait
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_analysis::utils::MemorySource;
//! use ledger_analysis::Analyzer;
//!
//! let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
//!     .with_row(&["ND-1", "Ana", "300,00", ""])
//!     .with_row(&["ND-2", "Ana", "250,00", ""])
//!     .with_row(&["ND-3", "Ana", "150,00", ""]);
//!
//! let report = Analyzer::new(source).reconcile("Ana", "400,00").unwrap();
//! let found = report.outcome.as_match().unwrap();
//! assert_eq!(found.formatted_total, "R$ 400,00");
//! ```

pub mod analyzer;
pub mod config;
pub mod io;
pub mod ranking;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use analyzer::*;
pub use config::*;
pub use ranking::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;

// Re-export amount helpers for convenience
pub use utils::amount::{format_brl, parse_amount, parse_br_amount};

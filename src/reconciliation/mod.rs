//! ND reconciliation: find outstanding entries that add up to a target value

pub mod candidates;
pub mod search;

pub use candidates::*;
pub use search::*;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::types::*;
use crate::utils::amount::{format_brl, parse_amount};
use crate::utils::validation::{validate_requester, validate_tolerance};

/// One matched ND in a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedLine {
    pub nd: String,
    pub amount: BigDecimal,
    pub formatted_amount: String,
}

/// The subset found by the search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationMatch {
    /// Matched NDs in search order (largest amounts first)
    pub lines: Vec<MatchedLine>,
    /// Sum of the matched amounts; equals the target within tolerance
    pub total: BigDecimal,
    pub formatted_total: String,
}

/// Outcome of a reconciliation
///
/// Finding no subset is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    Matched(ReconciliationMatch),
    NoSolution,
}

impl Reconciliation {
    pub fn is_match(&self) -> bool {
        matches!(self, Reconciliation::Matched(_))
    }

    pub fn as_match(&self) -> Option<&ReconciliationMatch> {
        match self {
            Reconciliation::Matched(m) => Some(m),
            Reconciliation::NoSolution => None,
        }
    }
}

/// Reconciliation outcome with the inputs and work that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub target: BigDecimal,
    pub formatted_target: String,
    /// Distinct outstanding NDs searched
    pub candidate_count: usize,
    pub stats: SearchStats,
    pub outcome: Reconciliation,
}

/// Reconciliation engine
///
/// Stateless apart from its settings; every call is independent.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    tolerance: BigDecimal,
    budget: SearchBudget,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    /// Engine with the default `0.00001` tolerance and no search budget
    pub fn new() -> Self {
        Self {
            tolerance: BigDecimal::from(1) / BigDecimal::from(100_000),
            budget: SearchBudget::unbounded(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: BigDecimal) -> AnalysisResult<Self> {
        validate_tolerance(&tolerance)?;
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn tolerance(&self) -> &BigDecimal {
        &self.tolerance
    }

    /// Search a prepared candidate set for a subset matching `target`
    pub fn reconcile(
        &self,
        candidates: &CandidateSet,
        target: &BigDecimal,
    ) -> AnalysisResult<ReconciliationReport> {
        debug!(
            "Searching {} candidates for {}",
            candidates.len(),
            format_brl(target)
        );

        let amounts = candidates.amounts();
        let (found, stats) = find_subset(&amounts, target, &self.tolerance, self.budget)
            .inspect_err(|e| warn!("Reconciliation aborted: {}", e))?;

        debug!("Search finished after {} branch visits", stats.visits);

        let outcome = match found {
            Some(indices) => {
                let lines: Vec<MatchedLine> = indices
                    .iter()
                    .filter_map(|&i| candidates.get(i))
                    .map(|c| MatchedLine {
                        nd: c.label.clone(),
                        amount: c.amount.clone(),
                        formatted_amount: format_brl(&c.amount),
                    })
                    .collect();
                let total: BigDecimal = lines.iter().map(|l| &l.amount).sum();

                info!(
                    "Matched {} NDs totalling {}",
                    lines.len(),
                    format_brl(&total)
                );

                Reconciliation::Matched(ReconciliationMatch {
                    lines,
                    formatted_total: format_brl(&total),
                    total,
                })
            }
            None => {
                info!("No ND combination matches {}", format_brl(target));
                Reconciliation::NoSolution
            }
        };

        Ok(ReconciliationReport {
            target: target.clone(),
            formatted_target: format_brl(target),
            candidate_count: candidates.len(),
            stats,
            outcome,
        })
    }

    /// Reconcile a requester's outstanding entries against a raw target value
    pub fn reconcile_entries(
        &self,
        entries: &[LedgerEntry],
        requester: &str,
        target: &RawAmount,
    ) -> AnalysisResult<ReconciliationReport> {
        validate_requester(requester)?;
        let target = parse_amount(target)?;
        let candidates = CandidateSet::from_entries(entries, requester);
        self.reconcile(&candidates, &target)
    }
}

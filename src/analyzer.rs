//! Analysis orchestrator over a table source

use tracing::info;

use crate::config::{AnalysisConfig, TopN};
use crate::io::rows::{outstanding_entries, payment_rows};
use crate::ranking::{rank_providers, CategoryFilter, ProviderRanking};
use crate::reconciliation::{CandidateSet, ReconciliationEngine, ReconciliationReport, SearchBudget};
use crate::traits::*;
use crate::types::*;
use crate::utils::amount::parse_br_amount;
use crate::utils::validation::validate_requester;

/// Runs both analyses against spreadsheets from one source
///
/// The table is reloaded for every call, so each analysis either fully
/// succeeds or fails on its own.
pub struct Analyzer<S: TableSource> {
    source: S,
    config: AnalysisConfig,
}

impl<S: TableSource> Analyzer<S> {
    /// Create an analyzer with the default configuration
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: AnalysisConfig::default(),
        }
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(source: S, config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Rank providers using the configured Top N and category filter
    pub fn top_providers(&self) -> AnalysisResult<ProviderRanking> {
        let filter = CategoryFilter::new(&self.config.category_filter)?;
        self.top_providers_with(self.config.top_n, &filter)
    }

    /// Rank providers with an explicit Top N and category filter
    pub fn top_providers_with(
        &self,
        top_n: TopN,
        filter: &CategoryFilter,
    ) -> AnalysisResult<ProviderRanking> {
        let table = self.source.load_table()?;
        let rows = payment_rows(&table, &self.config.columns.payments, Some(filter))?;
        let ranking = rank_providers(&rows, filter, top_n);

        info!(
            "Top {} providers for category {:?}: {} ranked",
            top_n,
            filter.token(),
            ranking.providers.len()
        );
        Ok(ranking)
    }

    /// Find outstanding NDs of `requester` adding up to `target`
    ///
    /// `target` is locale-formatted text such as `"1.500,00"`.
    pub fn reconcile(&self, requester: &str, target: &str) -> AnalysisResult<ReconciliationReport> {
        validate_requester(requester)?;
        let target = parse_br_amount(target)?;

        let table = self.source.load_table()?;
        let entries = outstanding_entries(&table, &self.config.columns.ledger, requester)?;
        let candidates = CandidateSet::from_entries(&entries, requester);

        info!(
            "Reconciling {} outstanding NDs for {:?}",
            candidates.len(),
            requester
        );

        self.engine()?.reconcile(&candidates, &target)
    }

    fn engine(&self) -> AnalysisResult<ReconciliationEngine> {
        Ok(ReconciliationEngine::new()
            .with_tolerance(self.config.tolerance.clone())?
            .with_budget(SearchBudget {
                max_visits: self.config.max_visits,
            }))
    }
}

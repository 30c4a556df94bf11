//! Top provider ranking by total amount paid within a category

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::TopN;
use crate::types::*;
use crate::utils::amount::format_brl;
use crate::utils::validation::validate_category_filter;

/// Token matching service categories ("Serviços", "Serviço Jurídico", ...)
pub const DEFAULT_CATEGORY_FILTER: &str = "servi";

/// Case-insensitive substring match on a category label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    token: String,
}

impl CategoryFilter {
    /// Create a filter from a non-empty token
    pub fn new(token: &str) -> AnalysisResult<Self> {
        validate_category_filter(token)?;
        Ok(Self {
            token: token.to_lowercase(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether a category passes; blank categories never do
    pub fn matches(&self, category: Option<&str>) -> bool {
        category.is_some_and(|c| c.to_lowercase().contains(&self.token))
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            token: DEFAULT_CATEGORY_FILTER.to_string(),
        }
    }
}

/// One line of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderTotal {
    pub provider: String,
    /// Sum of absolute amounts paid to the provider
    pub total: BigDecimal,
    /// `total` rendered as `R$ 1.234,56`
    pub formatted_total: String,
}

/// Result of a ranking run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRanking {
    pub category_filter: String,
    pub top_n: TopN,
    /// Rows that passed the category filter
    pub matched_rows: usize,
    /// Highest totals first, at most `top_n` entries
    pub providers: Vec<ProviderTotal>,
}

impl ProviderRanking {
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Rank providers by total absolute amount paid in matching categories
///
/// Providers with equal totals keep provider-name order; callers must not
/// rely on that order.
pub fn rank_providers(rows: &[PaymentRow], filter: &CategoryFilter, top_n: TopN) -> ProviderRanking {
    let mut totals: BTreeMap<&str, BigDecimal> = BTreeMap::new();
    let mut matched_rows = 0;

    for row in rows
        .iter()
        .filter(|r| filter.matches(r.category.as_deref()))
    {
        matched_rows += 1;
        *totals
            .entry(row.provider.as_str())
            .or_insert_with(|| BigDecimal::from(0)) += row.amount.abs();
    }

    let mut grouped: Vec<(&str, BigDecimal)> = totals.into_iter().collect();
    grouped.sort_by(|a, b| b.1.cmp(&a.1));
    grouped.truncate(top_n.count());

    debug!(
        "Ranked {} providers from {} matching rows",
        grouped.len(),
        matched_rows
    );

    ProviderRanking {
        category_filter: filter.token().to_string(),
        top_n,
        matched_rows,
        providers: grouped
            .into_iter()
            .map(|(provider, total)| ProviderTotal {
                provider: provider.to_string(),
                formatted_total: format_brl(&total),
                total,
            })
            .collect(),
    }
}

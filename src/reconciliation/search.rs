//! Depth-first subset-sum search over descending amounts
//!
//! The search walks the inclusion tree of `amounts` in a fixed order: at each
//! index it first tries taking the amount, then skipping it, and stops at the
//! first subset whose sum lies within `tolerance` of the target. Because the
//! amounts are sorted in non-increasing order, a branch whose running sum
//! already exceeds the target is abandoned.
//!
//! Worst case the search visits `O(2^n)` branches. Pruning keeps typical
//! ledgers fast when the target is small relative to the full sum, but there
//! is no polynomial bound; use [`SearchBudget`] to cap the work.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Upper bound on the number of branches a search may visit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// `None` searches exhaustively
    pub max_visits: Option<u64>,
}

impl SearchBudget {
    pub fn unbounded() -> Self {
        Self { max_visits: None }
    }

    pub fn max_visits(max_visits: u64) -> Self {
        Self {
            max_visits: Some(max_visits),
        }
    }
}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Branches evaluated, the root included
    pub visits: u64,
}

/// A pending branch: `next` is the index to decide on, `sum` the running
/// total. The chosen path is shared; `base_len` is its length at the parent
/// and `pick` the index this branch appends, if any.
struct Branch {
    next: usize,
    sum: BigDecimal,
    base_len: usize,
    pick: Option<usize>,
}

/// Find the first subset of `amounts` summing to `target` within `tolerance`
///
/// Returns the chosen indices in ascending order, or `None` when no subset
/// matches. `amounts` must be sorted in non-increasing order.
pub fn find_subset(
    amounts: &[BigDecimal],
    target: &BigDecimal,
    tolerance: &BigDecimal,
    budget: SearchBudget,
) -> AnalysisResult<(Option<Vec<usize>>, SearchStats)> {
    debug_assert!(amounts.windows(2).all(|w| w[0] >= w[1]));

    let mut stats = SearchStats::default();
    let mut path: Vec<usize> = Vec::new();
    let mut stack = vec![Branch {
        next: 0,
        sum: BigDecimal::from(0),
        base_len: 0,
        pick: None,
    }];

    while let Some(branch) = stack.pop() {
        stats.visits += 1;
        if let Some(max) = budget.max_visits {
            if stats.visits > max {
                return Err(AnalysisError::SearchBudgetExceeded { visits: max });
            }
        }

        path.truncate(branch.base_len);
        if let Some(index) = branch.pick {
            path.push(index);
        }

        if (&branch.sum - target).abs() < *tolerance {
            return Ok((Some(path), stats));
        }
        if branch.sum > *target || branch.next == amounts.len() {
            continue;
        }

        let i = branch.next;
        let base_len = path.len();
        // Pushed first so it is explored only after the inclusion subtree
        stack.push(Branch {
            next: i + 1,
            sum: branch.sum.clone(),
            base_len,
            pick: None,
        });
        stack.push(Branch {
            next: i + 1,
            sum: &branch.sum + &amounts[i],
            base_len,
            pick: Some(i),
        });
    }

    Ok((None, stats))
}

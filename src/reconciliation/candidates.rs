//! Candidate set construction: one grouped amount per outstanding ND

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// A distinct ND label with the summed amount of its outstanding rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub amount: BigDecimal,
}

impl Candidate {
    pub fn new(label: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Grouped candidates in search order
///
/// Invariant: amounts are non-increasing; equal amounts are ordered by label,
/// descending. The search's pruning rule depends on this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    /// Group `(label, amount)` pairs by label, summing amounts, then sort
    pub fn from_pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, BigDecimal)>,
        L: Into<String>,
    {
        let mut totals: HashMap<String, BigDecimal> = HashMap::new();
        for (label, amount) in pairs {
            *totals
                .entry(label.into())
                .or_insert_with(|| BigDecimal::from(0)) += amount;
        }

        let mut candidates: Vec<Candidate> = totals
            .into_iter()
            .map(|(label, amount)| Candidate { label, amount })
            .collect();
        candidates.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| b.label.cmp(&a.label))
        });

        Self { candidates }
    }

    /// Keep the outstanding entries of `requester`, then group by ND
    ///
    /// Requesters are compared with surrounding whitespace trimmed.
    pub fn from_entries<'a, I>(entries: I, requester: &str) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let requester = requester.trim();
        Self::from_pairs(
            entries
                .into_iter()
                .filter(|e| e.requester.trim() == requester && e.is_outstanding())
                .map(|e| (e.nd.as_str(), e.amount.clone())),
        )
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Amounts in search order
    pub fn amounts(&self) -> Vec<BigDecimal> {
        self.candidates.iter().map(|c| c.amount.clone()).collect()
    }

    /// Sum of every candidate
    pub fn total(&self) -> BigDecimal {
        self.candidates.iter().map(|c| &c.amount).sum()
    }
}

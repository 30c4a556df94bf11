//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate the requester name used to partition ledger entries
pub fn validate_requester(requester: &str) -> AnalysisResult<()> {
    if requester.trim().is_empty() {
        return Err(AnalysisError::Validation(
            "Requester cannot be empty".to_string(),
        ));
    }

    if requester.len() > 200 {
        return Err(AnalysisError::Validation(
            "Requester cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate the category substring filter
pub fn validate_category_filter(filter: &str) -> AnalysisResult<()> {
    if filter.trim().is_empty() {
        return Err(AnalysisError::Validation(
            "Category filter cannot be empty".to_string(),
        ));
    }

    if filter.len() > 100 {
        return Err(AnalysisError::Validation(
            "Category filter cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate the absolute match tolerance of the reconciler
pub fn validate_tolerance(tolerance: &BigDecimal) -> AnalysisResult<()> {
    if *tolerance <= BigDecimal::from(0) {
        Err(AnalysisError::Validation(
            "Tolerance must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Resolve every named column up front so a renamed sheet fails before any work
pub fn require_columns(table: &Table, columns: &[&str]) -> AnalysisResult<Vec<usize>> {
    columns.iter().map(|c| table.column_index(c)).collect()
}

//! Typed row extraction from decoded tables

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::config::{LedgerColumns, PaymentColumns};
use crate::ranking::CategoryFilter;
use crate::types::*;
use crate::utils::amount::parse_br_amount;
use crate::utils::validation::require_columns;

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Parse a receipt date as exported by common spreadsheet tools
pub fn parse_receipt_date(text: &str) -> AnalysisResult<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| AnalysisError::InvalidDate(text.to_string()))
}

/// Extract every ledger row, parsing amounts and receipt dates
///
/// Rows without an ND or requester are skipped.
pub fn ledger_entries(table: &Table, columns: &LedgerColumns) -> AnalysisResult<Vec<LedgerEntry>> {
    let idx = require_columns(
        table,
        &[
            columns.nd.as_str(),
            columns.amount.as_str(),
            columns.requester.as_str(),
            columns.receipt_date.as_str(),
        ],
    )?;
    let (nd_col, amount_col, requester_col, date_col) = (idx[0], idx[1], idx[2], idx[3]);

    let mut entries = Vec::new();
    for row in 0..table.len() {
        let (Some(nd), Some(requester)) = (table.cell(row, nd_col), table.cell(row, requester_col))
        else {
            continue;
        };
        let amount = parse_cell_amount(table, row, amount_col)?;
        let receipt_date = table
            .cell(row, date_col)
            .map(parse_receipt_date)
            .transpose()?;

        entries.push(LedgerEntry::new(
            nd.to_string(),
            amount,
            requester.to_string(),
            receipt_date,
        ));
    }

    debug!("Extracted {} ledger entries", entries.len());
    Ok(entries)
}

/// Extract the outstanding rows of one requester
///
/// Rows of other requesters and rows with any receipt date present are
/// skipped before their amounts are parsed. The requester is compared trimmed,
/// like every cell.
pub fn outstanding_entries(
    table: &Table,
    columns: &LedgerColumns,
    requester: &str,
) -> AnalysisResult<Vec<LedgerEntry>> {
    let idx = require_columns(
        table,
        &[
            columns.nd.as_str(),
            columns.amount.as_str(),
            columns.requester.as_str(),
            columns.receipt_date.as_str(),
        ],
    )?;
    let (nd_col, amount_col, requester_col, date_col) = (idx[0], idx[1], idx[2], idx[3]);
    let requester = requester.trim();

    let mut entries = Vec::new();
    for row in 0..table.len() {
        if table.cell(row, requester_col) != Some(requester) {
            continue;
        }
        if table.cell(row, date_col).is_some() {
            continue;
        }
        let amount = parse_cell_amount(table, row, amount_col)?;
        // Ungroupable without an ND
        let Some(nd) = table.cell(row, nd_col) else {
            continue;
        };

        entries.push(LedgerEntry::outstanding(
            nd.to_string(),
            amount,
            requester.to_string(),
        ));
    }

    debug!(
        "Extracted {} outstanding entries for requester {:?}",
        entries.len(),
        requester
    );
    Ok(entries)
}

/// Extract payment rows, optionally keeping only categories matching `filter`
///
/// Rows are filtered before their amounts are parsed. Rows without a provider
/// are skipped.
pub fn payment_rows(
    table: &Table,
    columns: &PaymentColumns,
    filter: Option<&CategoryFilter>,
) -> AnalysisResult<Vec<PaymentRow>> {
    let idx = require_columns(
        table,
        &[columns.provider.as_str(), columns.amount.as_str(), columns.category.as_str()],
    )?;
    let (provider_col, amount_col, category_col) = (idx[0], idx[1], idx[2]);

    let mut rows = Vec::new();
    for row in 0..table.len() {
        let category = table.cell(row, category_col);
        if let Some(filter) = filter {
            if !filter.matches(category) {
                continue;
            }
        }
        let amount = parse_cell_amount(table, row, amount_col)?;
        let Some(provider) = table.cell(row, provider_col) else {
            continue;
        };

        rows.push(PaymentRow::new(
            category.map(|c| c.to_string()),
            provider.to_string(),
            amount,
        ));
    }

    debug!("Extracted {} payment rows", rows.len());
    Ok(rows)
}

/// An absent amount cell contributes zero
fn parse_cell_amount(
    table: &Table,
    row: usize,
    column: usize,
) -> AnalysisResult<BigDecimal> {
    match table.cell(row, column) {
        Some(text) => parse_br_amount(text),
        None => Ok(BigDecimal::from(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_table() -> Table {
        Table::new(
            vec![
                "ND".into(),
                "Solicitante".into(),
                "valor".into(),
                "DT Recebimento".into(),
            ],
            vec![
                vec!["ND-1".into(), "Ana".into(), "1.000,00".into(), "".into()],
                vec!["ND-2".into(), "Ana".into(), "250,50".into(), "05/02/2024".into()],
                vec!["ND-3".into(), "Bruno".into(), "oops".into(), "".into()],
                vec!["ND-1".into(), "Ana".into(), "20,00".into(), "".into()],
            ],
        )
    }

    #[test]
    fn test_receipt_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(parse_receipt_date("05/02/2024").unwrap(), expected);
        assert_eq!(parse_receipt_date("2024-02-05").unwrap(), expected);
        assert_eq!(parse_receipt_date("2024-02-05 00:00:00").unwrap(), expected);
        assert!(matches!(
            parse_receipt_date("next week"),
            Err(AnalysisError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_outstanding_entries_skip_other_requesters_before_parsing() {
        let entries =
            outstanding_entries(&ledger_table(), &LedgerColumns::default(), "Ana").unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.is_outstanding() && e.nd == "ND-1"));
        assert_eq!(entries[0].amount, BigDecimal::from(1000));
    }

    #[test]
    fn test_malformed_amount_for_requester_is_parse_error() {
        let err =
            outstanding_entries(&ledger_table(), &LedgerColumns::default(), "Bruno").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(ref s) if s == "oops"));
    }

    #[test]
    fn test_blank_amount_keeps_nd_group_at_zero() {
        let table = Table::new(
            ledger_table().headers().to_vec(),
            vec![
                vec!["ND-1".into(), "Ana".into(), "".into(), "".into()],
                vec!["ND-2".into(), "Ana".into(), "  ".into(), "".into()],
                vec!["ND-2".into(), "Ana".into(), "40,00".into(), "".into()],
            ],
        );

        let entries = outstanding_entries(&table, &LedgerColumns::default(), "Ana").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].nd, "ND-1");
        assert_eq!(entries[0].amount, BigDecimal::from(0));
        assert_eq!(entries[1].amount, BigDecimal::from(0));
        assert_eq!(entries[2].amount, BigDecimal::from(40));
    }

    #[test]
    fn test_requester_argument_is_trimmed() {
        let entries =
            outstanding_entries(&ledger_table(), &LedgerColumns::default(), "  Ana ").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.requester == "Ana"));
    }

    #[test]
    fn test_renamed_column_is_lookup_failure() {
        let columns = LedgerColumns {
            requester: "Requester".into(),
            ..LedgerColumns::default()
        };
        let err = outstanding_entries(&ledger_table(), &columns, "Ana").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(ref c) if c == "Requester"));
    }

    #[test]
    fn test_ledger_entries_parse_dates() {
        let full = ledger_table();
        let table = Table::new(full.headers().to_vec(), full.rows()[..2].to_vec());
        let entries = ledger_entries(&table, &LedgerColumns::default()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].receipt_date, NaiveDate::from_ymd_opt(2024, 2, 5));
    }

    #[test]
    fn test_payment_rows_filter_before_parsing() {
        let table = Table::new(
            vec!["Nome".into(), "Categoria".into(), "Valor categoria/centro de custo".into()],
            vec![
                vec!["Acme".into(), "Serviços de TI".into(), "-1.200,00".into()],
                vec!["Loja".into(), "Produto".into(), "n/a".into()],
                vec!["".into(), "Serviço Jurídico".into(), "10,00".into()],
            ],
        );

        let filter = CategoryFilter::default();
        let rows = payment_rows(&table, &PaymentColumns::default(), Some(&filter)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].provider, "Acme");
        assert_eq!(rows[0].amount, BigDecimal::from(-1200));

        assert!(payment_rows(&table, &PaymentColumns::default(), None).is_err());
    }

    #[test]
    fn test_blank_payment_amount_adds_nothing() {
        let table = Table::new(
            vec!["Nome".into(), "Categoria".into(), "Valor categoria/centro de custo".into()],
            vec![
                vec!["Acme".into(), "Serviços de TI".into(), "-300,00".into()],
                vec!["Acme".into(), "Serviços de TI".into(), "".into()],
            ],
        );

        let rows = payment_rows(&table, &PaymentColumns::default(), None).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].amount, BigDecimal::from(0));
    }
}

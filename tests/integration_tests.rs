use bigdecimal::BigDecimal;
use ledger_analysis::io::CsvSource;
use ledger_analysis::utils::MemorySource;
use ledger_analysis::*;
use std::io::Write;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn matched_nds(report: &ReconciliationReport) -> Vec<String> {
    report
        .outcome
        .as_match()
        .map(|m| m.lines.iter().map(|l| l.nd.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_formatter_reference_values() {
    assert_eq!(format_brl(&dec("1500.00")), "R$ 1.500,00");
    assert_eq!(format_brl(&dec("0")), "R$ 0,00");
    assert_eq!(format_brl(&dec("999999.5")), "R$ 999.999,50");
}

#[test]
fn test_parse_format_roundtrip() {
    for cents in [0_i64, 1, 99, 100, 123_456, 99_999_999, 150_000, 7] {
        let amount = BigDecimal::new(cents.into(), 2);
        let text = format_brl(&amount);
        let parsed = parse_br_amount(text.trim_start_matches("R$ ")).unwrap();
        assert!((&parsed - &amount).abs() < dec("0.000000001"), "{}", text);
    }
}

#[test]
fn test_reconcile_single_match_first() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", "Ana", "500,00", ""])
        .with_row(&["B", "Ana", "300,00", ""])
        .with_row(&["C", "Ana", "200,00", ""]);

    let report = Analyzer::new(source).reconcile("Ana", "500").unwrap();
    assert_eq!(matched_nds(&report), ["A"]);
    assert_eq!(report.outcome.as_match().unwrap().formatted_total, "R$ 500,00");
}

#[test]
fn test_reconcile_combination_order() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["C", "Ana", "150,00", ""])
        .with_row(&["A", "Ana", "300,00", ""])
        .with_row(&["B", "Ana", "250,00", ""]);

    let report = Analyzer::new(source).reconcile("Ana", "400,00").unwrap();
    assert_eq!(matched_nds(&report), ["B", "C"]);
    assert_eq!(report.outcome.as_match().unwrap().formatted_total, "R$ 400,00");
}

#[test]
fn test_reconcile_no_solution_is_explicit() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", "Ana", "100,00", ""])
        .with_row(&["B", "Ana", "50,00", ""]);

    let report = Analyzer::new(source).reconcile("Ana", "1.000,00").unwrap();
    assert_eq!(report.outcome, Reconciliation::NoSolution);
    assert!(report.outcome.as_match().is_none());
}

#[test]
fn test_reconcile_groups_rows_by_nd() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["X", "Ana", "100,00", ""])
        .with_row(&["X", "Ana", "50,00", ""])
        .with_row(&["Y", "Ana", "120,00", ""]);
    let analyzer = Analyzer::new(source);

    let report = analyzer.reconcile("Ana", "150,00").unwrap();
    assert_eq!(matched_nds(&report), ["X"]);
    assert_eq!(report.outcome.as_match().unwrap().lines[0].formatted_amount, "R$ 150,00");
    assert_eq!(report.candidate_count, 2);

    let report = analyzer.reconcile("Ana", "100,00").unwrap();
    assert_eq!(report.outcome, Reconciliation::NoSolution);
}

#[test]
fn test_reconcile_from_csv_export() {
    let file = write_csv(
        "ND;Solicitante;valor;DT Recebimento;Observação\n\
         ND-001;Maria Souza;1.200,00;;\n\
         ND-002;Maria Souza;850,40;;adiantamento\n\
         ND-003;Maria Souza;349,60;;\n\
         ND-003;Maria Souza;300,00;;\n\
         ND-004;Maria Souza;500,00;12/03/2024;\n\
         ND-005;João Lima;xx;;\n",
    );

    let source = CsvSource::new(file.path()).with_delimiter(b';');
    let analyzer = Analyzer::new(source);

    // Candidates: ND-001 1200, ND-002 850.40, ND-003 649.60
    let report = analyzer.reconcile("Maria Souza", "1.500,00").unwrap();
    assert_eq!(matched_nds(&report), ["ND-002", "ND-003"]);
    assert_eq!(report.outcome.as_match().unwrap().total, dec("1500.00"));

    let report = analyzer.reconcile("Maria Souza", "2.700,00").unwrap();
    assert_eq!(matched_nds(&report), ["ND-001", "ND-002", "ND-003"]);

    let err = analyzer.reconcile("João Lima", "1,00").unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(_)));
}

#[test]
fn test_reconcile_rejects_malformed_target() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"]);
    let err = Analyzer::new(source).reconcile("Ana", "R$ 12").unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(ref s) if s == "R$ 12"));
}

#[test]
fn test_blank_amounts_contribute_nothing() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", "Ana", "300,00", ""])
        .with_row(&["B", "Ana", "", ""])
        .with_row(&["C", "Ana", "100,00", ""]);

    let report = Analyzer::new(source).reconcile("Ana", "400,00").unwrap();
    assert_eq!(matched_nds(&report), ["A", "C"]);
    assert_eq!(report.candidate_count, 3);

    let source = MemorySource::new(&["Nome", "Categoria", "Valor categoria/centro de custo"])
        .with_row(&["Acme", "Serviços de TI", "-1.000,00"])
        .with_row(&["Acme", "Serviços de TI", ""])
        .with_row(&["Lex", "Serviço Jurídico", "-400,00"]);

    let ranking = Analyzer::new(source).top_providers().unwrap();
    assert_eq!(ranking.providers[0].provider, "Acme");
    assert_eq!(ranking.providers[0].formatted_total, "R$ 1.000,00");
}

#[test]
fn test_exponent_target_is_rejected() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", "Ana", "300,00", ""]);

    let err = Analyzer::new(source).reconcile("Ana", "1e400000000").unwrap_err();
    assert!(matches!(err, AnalysisError::Parse(ref s) if s == "1e400000000"));
}

#[test]
fn test_requester_with_padding_matches() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", " Ana", "300,00", ""])
        .with_row(&["B", "Ana", "100,00", ""]);

    let report = Analyzer::new(source).reconcile("Ana ", "400,00").unwrap();
    assert_eq!(matched_nds(&report), ["A", "B"]);
}

#[test]
fn test_top_providers_from_csv_export() {
    let file = write_csv(
        "Nome,Categoria, Valor categoria/centro de custo \n\
         Acme,Serviços de TI,\"-1.000,00\"\n\
         Lex,Serviço Jurídico,\"-2.500,00\"\n\
         Acme,Serviços de TI,\"-1.600,00\"\n\
         Loja,Produto,\"-9.999,00\"\n\
         Limpa,Serviços Gerais,\"-100,00\"\n",
    );

    let analyzer = Analyzer::new(CsvSource::new(file.path()));
    let ranking = analyzer.top_providers().unwrap();

    let names: Vec<&str> = ranking.providers.iter().map(|p| p.provider.as_str()).collect();
    assert_eq!(names, ["Acme", "Lex", "Limpa"]);
    assert_eq!(ranking.providers[0].formatted_total, "R$ 2.600,00");
    assert_eq!(ranking.matched_rows, 4);
    assert_eq!(ranking.top_n, TopN::Five);
}

#[test]
fn test_top_providers_custom_filter_and_limit() {
    let mut source = MemorySource::new(&["Nome", "Categoria", "Valor categoria/centro de custo"]);
    for i in 1..=25 {
        let name = format!("Consultor {:02}", i);
        let amount = format!("{},00", i * 100);
        source.push_row(&[name.as_str(), "Consultoria", amount.as_str()]);
    }
    source.push_row(&["Acme", "Serviços", "99.999,00"]);

    let analyzer = Analyzer::new(source);
    let ranking = analyzer
        .top_providers_with(TopN::Twenty, &CategoryFilter::new("CONSULT").unwrap())
        .unwrap();

    assert_eq!(ranking.providers.len(), 20);
    assert_eq!(ranking.providers[0].provider, "Consultor 25");
    assert!(ranking.providers.iter().all(|p| p.provider != "Acme"));
}

#[test]
fn test_missing_columns_fail_both_analyses() {
    let source = MemorySource::new(&["Name", "Category", "Amount"]).with_row(&["a", "b", "1"]);
    let analyzer = Analyzer::new(source);

    assert!(matches!(
        analyzer.top_providers(),
        Err(AnalysisError::MissingColumn(ref c)) if c == "Nome"
    ));
    assert!(matches!(
        analyzer.reconcile("Ana", "1,00"),
        Err(AnalysisError::MissingColumn(ref c)) if c == "ND"
    ));
}

#[test]
fn test_config_file_renames_columns() {
    let config = AnalysisConfig::from_toml_str(
        r#"
        [columns.ledger]
        nd = "Nota"
        requester = "Requester"
        amount = "Amount"
        receipt_date = "Received"
        "#,
    )
    .unwrap();

    let source = MemorySource::new(&["Nota", "Requester", "Amount", "Received"])
        .with_row(&["N1", "Ana", "10,00", ""])
        .with_row(&["N2", "Ana", "5,00", ""]);

    let analyzer = Analyzer::with_config(source, config).unwrap();
    let report = analyzer.reconcile("Ana", "15,00").unwrap();
    assert_eq!(matched_nds(&report), ["N1", "N2"]);
}

#[test]
fn test_report_serializes_to_json() {
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["A", "Ana", "300,00", ""])
        .with_row(&["B", "Ana", "250,00", ""]);
    let analyzer = Analyzer::new(source);

    let report = analyzer.reconcile("Ana", "550,00").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "matched");
    assert_eq!(json["outcome"]["formatted_total"], "R$ 550,00");
    assert_eq!(json["outcome"]["lines"][1]["nd"], "B");

    let report = analyzer.reconcile("Ana", "1,00").unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "no_solution");
}

//! ND reconciliation example

use bigdecimal::BigDecimal;
use ledger_analysis::io::ledger_entries;
use ledger_analysis::utils::MemorySource;
use ledger_analysis::{
    format_brl, Analyzer, CandidateSet, LedgerColumns, RawAmount, Reconciliation,
    ReconciliationEngine, SearchBudget, TableSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Ledger Analysis - ND Reconciliation Example\n");

    // 1. A ledger export with outstanding and received NDs
    let source = MemorySource::new(&["ND", "Solicitante", "valor", "DT Recebimento"])
        .with_row(&["ND-101", "Maria Souza", "1.200,00", ""])
        .with_row(&["ND-102", "Maria Souza", "850,40", ""])
        .with_row(&["ND-103", "Maria Souza", "349,60", ""])
        .with_row(&["ND-103", "Maria Souza", "300,00", ""])
        .with_row(&["ND-104", "Maria Souza", "500,00", "12/03/2024"])
        .with_row(&["ND-105", "João Lima", "649,60", ""]);

    let analyzer = Analyzer::new(source.clone());

    // 2. Look for NDs closing a payment of R$ 1.500,00
    println!("🔎 Reconciling R$ 1.500,00 for Maria Souza...\n");
    let report = analyzer.reconcile("Maria Souza", "1.500,00")?;

    match &report.outcome {
        Reconciliation::Matched(found) => {
            for line in &found.lines {
                println!("  ✓ {} - {}", line.nd, line.formatted_amount);
            }
            println!("\n  Soma total: {}", found.formatted_total);
        }
        Reconciliation::NoSolution => println!("  ❌ No combination found"),
    }
    println!(
        "  ({} candidates, {} branch visits)\n",
        report.candidate_count, report.stats.visits
    );

    // 3. A target no subset can reach
    let report = analyzer.reconcile("Maria Souza", "10,00")?;
    println!(
        "🔎 Reconciling {}: match = {}\n",
        report.formatted_target,
        report.outcome.is_match()
    );

    // 4. Extracting typed entries and reconciling them directly
    println!("📋 Ledger entries:");
    let entries = ledger_entries(&source.load_table()?, &LedgerColumns::default())?;
    for entry in &entries {
        let status = match entry.receipt_date {
            Some(date) => format!("received {}", date.format("%d/%m/%Y")),
            None => "outstanding".to_string(),
        };
        println!(
            "  {} {} - {} ({})",
            entry.nd,
            entry.requester,
            format_brl(&entry.amount),
            status
        );
    }
    let report = ReconciliationEngine::new().reconcile_entries(
        &entries,
        "Maria Souza",
        &RawAmount::from("2.700,00"),
    )?;
    println!("  Reconciling {}: match = {}\n", report.formatted_target, report.outcome.is_match());

    // 5. Using the engine directly with a search budget
    println!("⚙️  Engine with a 1.000 visit budget...");
    let candidates = CandidateSet::from_pairs(
        (1..=40).map(|i| (format!("ND-{:03}", i), BigDecimal::from(i * 10))),
    );
    let engine = ReconciliationEngine::new().with_budget(SearchBudget::max_visits(1_000));
    match engine.reconcile(&candidates, &BigDecimal::from(5)) {
        Ok(report) => println!("  Finished: match = {}", report.outcome.is_match()),
        Err(e) => println!("  Stopped: {}", e),
    }
    println!("  Full candidate total: {}", format_brl(&candidates.total()));

    Ok(())
}

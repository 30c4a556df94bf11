//! ledger-analysis CLI
//!
//! Usage:
//!   ledger-analysis top-providers --file pagamentos.csv --top-n 10
//!   ledger-analysis reconcile --file nds.csv --requester "Ana" --target "1.500,00"

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ledger_analysis::io::CsvSource;
use ledger_analysis::{
    AnalysisConfig, Analyzer, CategoryFilter, ProviderRanking, Reconciliation,
    ReconciliationReport, TopN,
};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::TopProviders {
            input,
            top_n,
            category,
        } => {
            if let Some(n) = top_n {
                config.top_n = TopN::try_from(n)?;
            }
            if let Some(category) = category {
                config.category_filter = category;
            }
            let analyzer = Analyzer::with_config(open_source(&input)?, config)?;
            let filter = CategoryFilter::new(&analyzer.config().category_filter)?;
            let ranking = analyzer
                .top_providers_with(analyzer.config().top_n, &filter)
                .with_context(|| format!("Failed to rank providers in {}", input.file.display()))?;

            if input.json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                print_ranking(&ranking);
            }
        }
        Commands::Reconcile {
            input,
            requester,
            target,
            max_visits,
        } => {
            if max_visits.is_some() {
                config.max_visits = max_visits;
            }
            let analyzer = Analyzer::with_config(open_source(&input)?, config)?;
            let report = analyzer
                .reconcile(&requester, &target)
                .with_context(|| format!("Failed to reconcile NDs for {:?}", requester))?;

            if input.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_reconciliation(&report);
            }
        }
    }

    Ok(())
}

fn open_source(input: &InputArgs) -> Result<CsvSource> {
    if !input.file.exists() {
        bail!("Spreadsheet not found: {}", input.file.display());
    }
    if !input.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    Ok(CsvSource::new(&input.file).with_delimiter(input.delimiter as u8))
}

fn print_ranking(ranking: &ProviderRanking) {
    println!(
        "🏆 Top {} prestadores (categoria contendo {:?})\n",
        ranking.top_n, ranking.category_filter
    );

    if ranking.is_empty() {
        println!("Nenhuma linha corresponde ao filtro de categoria.");
        return;
    }

    let width = ranking
        .providers
        .iter()
        .map(|p| p.provider.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    println!("{:<width$}  Total Pago (R$)", "Nome", width = width);
    for provider in &ranking.providers {
        println!(
            "{:<width$}  {}",
            provider.provider,
            provider.formatted_total,
            width = width
        );
    }
}

fn print_reconciliation(report: &ReconciliationReport) {
    match &report.outcome {
        Reconciliation::Matched(found) => {
            println!("✔ Combinação encontrada!\n");
            let width = found
                .lines
                .iter()
                .map(|l| l.nd.chars().count())
                .max()
                .unwrap_or(0)
                .max(2);

            println!("{:<width$}  Total", "ND", width = width);
            for line in &found.lines {
                println!(
                    "{:<width$}  {}",
                    line.nd,
                    line.formatted_amount,
                    width = width
                );
            }
            println!("\nSoma total: {}", found.formatted_total);
        }
        Reconciliation::NoSolution => {
            println!("❌ Nenhuma combinação de ND fecha o valor alvo.");
        }
    }
}

//! Top providers ranking example

use ledger_analysis::utils::MemorySource;
use ledger_analysis::{AnalysisConfig, Analyzer, CategoryFilter, TopN};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏆 Ledger Analysis - Top Providers Example\n");

    let source = MemorySource::new(&["Nome", "Categoria", "Valor categoria/centro de custo"])
        .with_row(&["Acme Tecnologia", "Serviços de TI", "-12.500,00"])
        .with_row(&["Silva Advogados", "Serviço Jurídico", "-8.000,00"])
        .with_row(&["Acme Tecnologia", "Serviços de TI", "-2.750,50"])
        .with_row(&["Limpeza Total", "Serviços Gerais", "-3.100,00"])
        .with_row(&["Papelaria Central", "Produto", "-900,00"])
        .with_row(&["Contábil Prime", "Consultoria", "-4.000,00"]);

    // 1. Default settings: Top 5, categories containing "servi"
    let analyzer = Analyzer::new(source.clone());
    let ranking = analyzer.top_providers()?;
    println!("📊 Top {} (filter {:?}):", ranking.top_n, ranking.category_filter);
    for (i, provider) in ranking.providers.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, provider.provider, provider.formatted_total);
    }
    println!();

    // 2. Overriding the category filter
    let config = AnalysisConfig {
        category_filter: "consult".to_string(),
        top_n: TopN::Ten,
        ..AnalysisConfig::default()
    };
    let analyzer = Analyzer::with_config(source, config)?;
    let ranking = analyzer.top_providers_with(TopN::Ten, &CategoryFilter::new("consult")?)?;
    println!("📊 Consulting providers:");
    for provider in &ranking.providers {
        println!("  - {} - {}", provider.provider, provider.formatted_total);
    }

    Ok(())
}

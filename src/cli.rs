//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Provider rankings and ND reconciliation over exported ledgers
#[derive(Parser)]
#[command(name = "ledger-analysis")]
#[command(about = "Financial analyses over exported spreadsheets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (column names, filter, tolerance, search budget)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads a spreadsheet
#[derive(Args)]
pub struct InputArgs {
    /// CSV export of the spreadsheet
    #[arg(short, long)]
    pub file: PathBuf,

    /// Field delimiter (use ';' for pt-BR exports)
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank service providers by total amount paid
    TopProviders {
        #[command(flatten)]
        input: InputArgs,

        /// Number of providers to show: 5, 10, 20 or 50
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Case-insensitive category substring (default "servi")
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Find outstanding NDs of a requester that add up to a target value
    Reconcile {
        #[command(flatten)]
        input: InputArgs,

        /// Requester (Solicitante), matched exactly
        #[arg(short, long)]
        requester: String,

        /// Target value, e.g. "1.500,00"
        #[arg(short, long)]
        target: String,

        /// Abort after this many search branch visits
        #[arg(long)]
        max_visits: Option<u64>,
    },
}

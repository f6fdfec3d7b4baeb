use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;

/// Loads `amount,category` expenses from CSV, highlights the ones matching a
/// filter and prints the resulting table as CSV.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input CSV file. Reads standard input when omitted.
    pub input: Option<PathBuf>,

    /// Highlight transactions of exactly this amount.
    #[arg(long, conflicts_with = "category")]
    pub amount: Option<Decimal>,

    /// Highlight transactions of this category (case sensitive).
    #[arg(long)]
    pub category: Option<String>,

    /// Undo the transaction shown with this serial number. Repeatable.
    #[arg(long = "undo", value_name = "SERIAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub undo: Vec<u64>,
}

impl Args {
    /// Zero based table rows for the requested serial numbers.
    pub fn undo_rows(&self) -> Vec<usize> {
        self.undo.iter().map(|serial| (serial - 1) as usize).collect()
    }
}

/// Parse cli args shorthand
pub fn parse() -> Args {
    Args::parse()
}

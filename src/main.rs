use anyhow::Result;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{self};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    AmountFilter, CategoryFilter, Controller, TableView, cli, csv_writer::CsvTableWriter,
    processor::Engine,
};

const DEFAULT_HAS_HEADERS: bool = true;

fn main() -> Result<()> {
    setup_logging();

    let args = cli::parse();
    let input: Box<dyn io::Read> = match &args.input {
        None => Box::new(io::stdin()),
        Some(path) => Box::new(File::open(path)?),
    };

    let reader = ReaderBuilder::new()
        .has_headers(DEFAULT_HAS_HEADERS)
        .trim(Trim::All)
        .from_reader(input);
    let writer = CsvTableWriter::stdout();
    let controller = Controller::new(TableView::new());

    let mut engine = Engine::new(writer, reader, controller).with_undo(args.undo_rows());
    if let Some(amount) = args.amount {
        engine = engine.with_filter(AmountFilter::new(amount));
    } else if let Some(category) = args.category {
        engine = engine.with_filter(CategoryFilter::new(category));
    }

    let summary = engine.run()?;
    tracing::info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        undone = summary.undone,
        total = %engine.controller().model().total_cost(),
        "done"
    );

    Ok(())
}

/// Logs go to stderr so stdout only carries the CSV table. `RUST_LOG`
/// overrides the default `info` level.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}

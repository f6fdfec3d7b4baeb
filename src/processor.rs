use std::{cell::RefCell, io::Read};

use crate::{
    controller::Controller,
    filter::TransactionFilter,
    models::NewExpense,
    traits::{CSVExport, CSVWrite, TransactionView},
};
use anyhow::Result;
use csv::Reader;
use rust_decimal::Decimal;

/// Outcome of an [`Engine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub undone: usize,
}

/// Feeds expenses read from CSV through a [`Controller`], then writes the
/// resulting table out.
pub struct Engine<T, V> {
    writer: T,
    reader: Reader<Box<dyn Read>>,
    controller: Controller<V>,
    undo_rows: Vec<usize>,
}

impl<T, V> Engine<T, V>
where
    T: CSVWrite,
    V: TransactionView + CSVExport,
{
    pub fn new(writer: T, reader: Reader<Box<dyn Read>>, controller: Controller<V>) -> Self {
        Self {
            writer,
            reader,
            controller,
            undo_rows: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl TransactionFilter + 'static) -> Self {
        self.controller.set_filter(filter);
        self
    }

    /// Table rows (zero based) to undo once every expense is loaded.
    pub fn with_undo(mut self, rows: Vec<usize>) -> Self {
        self.undo_rows = rows;
        self
    }

    pub fn controller(&self) -> &Controller<V> {
        &self.controller
    }

    /// Loads every expense, undoes the requested rows, applies the filter and
    /// exports the table. Invalid expenses are counted and skipped; malformed
    /// CSV or an undo of a missing row aborts the run.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for rec in self.reader.deserialize::<NewExpense>() {
            let expense: NewExpense = rec?;
            let accepted = match expense.amount().parse::<Decimal>() {
                Ok(amount) => self.controller.add_transaction(amount, expense.category()),
                Err(err) => {
                    tracing::warn!(amount = %expense.amount(), "unparsable amount: {err}");
                    false
                }
            };
            if accepted {
                summary.accepted += 1;
            } else {
                summary.rejected += 1;
            }
        }

        summary.undone = self.controller.undo_transaction(&self.undo_rows)?.len();
        self.controller.apply_filter();

        let writer = RefCell::new(&mut self.writer);
        self.controller.view().export(writer)?;

        Ok(summary)
    }
}

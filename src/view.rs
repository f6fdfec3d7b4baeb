use std::{cell::RefCell, collections::BTreeSet};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::{
    models::{ExpenseRow, Transaction},
    traits::{CSVExport, CSVWrite, TransactionView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Background of rows matching the active filter.
    pub const HIGHLIGHT: Color = Color::new(173, 255, 168);
    pub const DEFAULT_BACKGROUND: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }
}

/// In-memory transactions table with a total cost footer.
#[derive(Debug, Default)]
pub struct TableView {
    rows: Vec<ExpenseRow>,
    total_cost: Decimal,
    selection: BTreeSet<usize>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row: usize) -> Option<&ExpenseRow> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[ExpenseRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }
}

impl TransactionView for TableView {
    fn refresh(&mut self, transactions: &[Transaction]) {
        self.rows = transactions
            .iter()
            .enumerate()
            .map(|(row, tx)| ExpenseRow::from_transaction(row, tx))
            .collect();
        self.total_cost = transactions.iter().map(|tx| *tx.amount()).sum();

        let len = self.rows.len();
        self.selection.retain(|row| *row < len);
    }

    fn highlight_rows(&mut self, rows: &[usize]) {
        for row in self.rows.iter_mut() {
            row.set_highlighted(false);
        }
        for &index in rows {
            match self.rows.get_mut(index) {
                Some(row) => row.set_highlighted(true),
                None => tracing::debug!(row = index, "ignoring highlight past end of table"),
            }
        }
    }

    fn highlight_color_for(&self, row: usize) -> Color {
        match self.rows.get(row) {
            Some(row) if *row.highlighted() => Color::HIGHLIGHT,
            _ => Color::DEFAULT_BACKGROUND,
        }
    }

    fn selected_rows(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    fn set_row_selection_interval(&mut self, first: usize, last: usize) {
        let (low, high) = (first.min(last), first.max(last));
        let len = self.rows.len();
        self.selection = (low..=high).take_while(|row| *row < len).collect();
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

impl CSVExport for TableView {
    fn export(&self, writer: RefCell<&mut impl CSVWrite>) -> Result<()> {
        for row in &self.rows {
            writer.borrow_mut().write_record(row)?;
        }
        writer.borrow_mut().flush()
    }
}

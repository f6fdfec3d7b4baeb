use std::cell::RefCell;

use anyhow::Result;
use serde::Serialize;

use crate::{models::Transaction, view::Color};

/// CSVWrite trait provides a method to write a record to a CSV sink.
pub trait CSVWrite {
    /// Writes a record to the CSV sink.
    ///
    /// # Arguments
    /// * `record` - The Serializable record to write.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()>;

    /// Flushes buffered records to the underlying sink.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// CSVExport trait provides a method to export rows as CSV.
pub trait CSVExport {
    /// Exports every row.
    ///
    /// # Arguments
    /// * `writer` - The writer to write the rows to.
    ///
    /// # Returns
    /// A Result indicating success or failure.
    fn export(&self, writer: RefCell<&mut impl CSVWrite>) -> Result<()>;
}

/// Presentation layer showing the transactions as a table.
///
/// Rows are zero based and follow the order of the slice last passed to
/// [`TransactionView::refresh`].
pub trait TransactionView {
    /// Replaces the displayed rows. Highlights are cleared, the selection is
    /// clamped to the new row count.
    fn refresh(&mut self, transactions: &[Transaction]);

    /// Highlights exactly `rows`, every other row gets the default background.
    fn highlight_rows(&mut self, rows: &[usize]);

    /// Background color of `row`.
    fn highlight_color_for(&self, row: usize) -> Color;

    /// Selected rows in ascending order.
    fn selected_rows(&self) -> Vec<usize>;

    /// Selects rows `first..=last`. Bounds may come in either order.
    fn set_row_selection_interval(&mut self, first: usize, last: usize);

    fn clear_selection(&mut self);
}

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::{
    errors::TrackerError,
    filter::TransactionFilter,
    ledger::Ledger,
    models::{Transaction, TransactionId, validate_amount, validate_category},
    traits::TransactionView,
};

/// Mediates between the [`Ledger`] and a [`TransactionView`].
///
/// Every mutation of the ledger is followed by a view refresh, and the
/// active filter (if any) is applied again so highlights stay in sync.
#[derive(Debug)]
pub struct Controller<V> {
    model: Ledger,
    view: V,
    filter: Option<Box<dyn TransactionFilter>>,
}

impl<V> Controller<V>
where
    V: TransactionView,
{
    pub fn new(view: V) -> Self {
        Self::with_ledger(Ledger::new(), view)
    }

    pub fn with_ledger(model: Ledger, view: V) -> Self {
        let mut controller = Self {
            model,
            view,
            filter: None,
        };
        controller.refresh();
        controller
    }

    pub fn model(&self) -> &Ledger {
        &self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Validates the input and records a new transaction stamped with the
    /// current time. Nothing is mutated when validation fails.
    pub fn try_add_transaction(
        &mut self,
        amount: Decimal,
        category: &str,
    ) -> Result<TransactionId, TrackerError> {
        validate_amount(amount)?;
        validate_category(category)?;

        let id = self.model.add_transaction(Transaction::new(amount, category));
        self.refresh();
        Ok(id)
    }

    /// Same as [`Controller::try_add_transaction`], reporting only whether
    /// the transaction was recorded.
    pub fn add_transaction(&mut self, amount: Decimal, category: &str) -> bool {
        match self.try_add_transaction(amount, category) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(%amount, category, "rejected transaction: {err}");
                false
            }
        }
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<Transaction, TrackerError> {
        let removed = self.model.remove_transaction(id)?;
        self.refresh();
        Ok(removed)
    }

    /// Replaces the active filter. Highlights change on the next
    /// [`Controller::apply_filter`].
    pub fn set_filter(&mut self, filter: impl TransactionFilter + 'static) {
        tracing::debug!(?filter, "filter set");
        self.filter = Some(Box::new(filter));
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    pub fn filter(&self) -> Option<&dyn TransactionFilter> {
        self.filter.as_deref()
    }

    /// Highlights the rows matching the active filter and returns them.
    /// Without a filter every highlight is cleared.
    pub fn apply_filter(&mut self) -> Vec<usize> {
        let rows = match &self.filter {
            Some(filter) => filter.matching_rows(self.model.as_slice()),
            None => Vec::new(),
        };
        self.view.highlight_rows(&rows);
        rows
    }

    /// Removes the transactions shown at the given table rows.
    ///
    /// Duplicate rows are ignored. The removed transactions are returned in
    /// table order; an empty selection removes nothing.
    ///
    /// # Errors
    /// [`TrackerError::RowOutOfRange`] if any row does not exist. The ledger
    /// is left untouched in that case.
    pub fn undo_transaction(&mut self, rows: &[usize]) -> Result<Vec<Transaction>, TrackerError> {
        let len = self.model.len();
        let rows: BTreeSet<usize> = rows.iter().copied().collect();
        if let Some(&row) = rows.iter().find(|row| **row >= len) {
            return Err(TrackerError::RowOutOfRange { row, len });
        }

        let ids: Vec<TransactionId> = rows
            .iter()
            .filter_map(|row| self.model.get(*row))
            .map(|tx| *tx.id())
            .collect();

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            removed.push(self.model.remove_transaction(id)?);
        }

        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "undid transactions");
            self.refresh();
        }
        Ok(removed)
    }

    /// Undoes the rows currently selected in the view and clears the selection.
    pub fn undo_selected(&mut self) -> Result<Vec<Transaction>, TrackerError> {
        let rows = self.view.selected_rows();
        let removed = self.undo_transaction(&rows)?;
        self.view.clear_selection();
        Ok(removed)
    }

    fn refresh(&mut self) {
        self.view.refresh(self.model.as_slice());
        if self.filter.is_some() {
            self.apply_filter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filter::{AmountFilter, CategoryFilter},
        models::parse_timestamp,
        view::{Color, TableView},
    };
    use anyhow::Result;
    use chrono::Local;
    use rust_decimal::prelude::*;

    fn controller() -> Controller<TableView> {
        Controller::new(TableView::new())
    }

    fn controller_with_three() -> Controller<TableView> {
        let mut controller = controller();
        assert!(controller.add_transaction(dec!(30.0), "food"));
        assert!(controller.add_transaction(dec!(50.0), "travel"));
        assert!(controller.add_transaction(dec!(70.0), "food"));
        controller
    }

    #[test]
    fn test_add_valid_transaction() -> Result<()> {
        let mut controller = controller();
        assert!(controller.model().is_empty());

        assert!(controller.add_transaction(dec!(50.0), "food"));
        assert_eq!(controller.model().len(), 1);

        let tx = controller.model().get(0).unwrap();
        assert_eq!(*tx.amount(), dec!(50.0));
        assert_eq!(tx.category(), "food");
        let stamped = parse_timestamp(&tx.timestamp_string())?;
        assert!(Local::now().signed_duration_since(stamped).num_milliseconds() < 60_000);

        assert_eq!(controller.model().total_cost(), dec!(50.0));
        assert_eq!(controller.view().row_count(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_input_is_rejected_without_mutation() {
        let mut controller = controller();
        assert!(!controller.add_transaction(dec!(-10.0), ""));
        assert!(!controller.add_transaction(dec!(0), "food"));
        assert!(!controller.add_transaction(dec!(10), ""));

        assert!(controller.model().is_empty());
        assert_eq!(controller.model().total_cost(), dec!(0.0));
        assert_eq!(controller.view().row_count(), 0);
    }

    #[test]
    fn test_try_add_reports_reason() {
        let mut controller = controller();
        assert_eq!(
            controller.try_add_transaction(dec!(-1), "food"),
            Err(TrackerError::InvalidAmount(dec!(-1)))
        );
        assert_eq!(
            controller.try_add_transaction(dec!(1), ""),
            Err(TrackerError::EmptyCategory)
        );
    }

    #[test]
    fn test_filter_by_amount_highlights_matching_row() {
        let mut controller = controller_with_three();
        controller.set_filter(AmountFilter::new(dec!(50.0)));

        assert_eq!(controller.apply_filter(), vec![1]);
        let view = controller.view();
        assert_eq!(view.highlight_color_for(1), Color::new(173, 255, 168));
        assert_eq!(view.highlight_color_for(0), Color::DEFAULT_BACKGROUND);
        assert_eq!(view.highlight_color_for(2), Color::DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_filter_by_category_highlights_matching_row() {
        let mut controller = controller_with_three();
        controller.set_filter(CategoryFilter::new("travel"));

        assert_eq!(controller.apply_filter(), vec![1]);
        assert_eq!(controller.view().highlight_color_for(1), Color::HIGHLIGHT);
        assert_eq!(
            controller.view().highlight_color_for(2),
            Color::DEFAULT_BACKGROUND
        );
    }

    #[test]
    fn test_set_filter_replaces_previous_and_waits_for_apply() {
        let mut controller = controller_with_three();
        controller.set_filter(CategoryFilter::new("travel"));
        controller.apply_filter();

        controller.set_filter(CategoryFilter::new("food"));
        assert_eq!(controller.view().highlight_color_for(1), Color::HIGHLIGHT);

        assert_eq!(controller.apply_filter(), vec![0, 2]);
        assert_eq!(
            controller.view().highlight_color_for(1),
            Color::DEFAULT_BACKGROUND
        );
    }

    #[test]
    fn test_clear_filter_removes_highlights() {
        let mut controller = controller_with_three();
        controller.set_filter(AmountFilter::new(dec!(70)));
        controller.apply_filter();

        controller.clear_filter();
        assert!(controller.filter().is_none());
        assert!(controller.apply_filter().is_empty());
        assert_eq!(
            controller.view().highlight_color_for(2),
            Color::DEFAULT_BACKGROUND
        );
    }

    #[test]
    fn test_highlights_follow_mutations() -> Result<()> {
        let mut controller = controller_with_three();
        controller.set_filter(CategoryFilter::new("travel"));
        controller.apply_filter();

        controller.undo_transaction(&[0])?;
        assert_eq!(controller.view().highlight_color_for(0), Color::HIGHLIGHT);
        assert_eq!(
            controller.view().highlight_color_for(1),
            Color::DEFAULT_BACKGROUND
        );
        Ok(())
    }

    #[test]
    fn test_undo_selected_range() -> Result<()> {
        let mut controller = controller_with_three();
        let before = controller.model().transactions();

        controller.view_mut().set_row_selection_interval(0, 2);
        let removed = controller.undo_selected()?;

        assert_eq!(removed.len(), 3);
        assert_ne!(before, controller.model().transactions());
        assert!(controller.model().is_empty());
        assert!(controller.view().selected_rows().is_empty());
        Ok(())
    }

    #[test]
    fn test_undo_removes_exactly_given_rows() -> Result<()> {
        let mut controller = controller_with_three();
        let removed = controller.undo_transaction(&[2, 0, 2])?;

        assert_eq!(removed.len(), 2);
        assert_eq!(*removed[0].amount(), dec!(30.0));
        assert_eq!(*removed[1].amount(), dec!(70.0));
        assert_eq!(controller.model().len(), 1);
        assert_eq!(controller.model().get(0).unwrap().category(), "travel");
        assert_eq!(controller.model().total_cost(), dec!(50.0));
        Ok(())
    }

    #[test]
    fn test_undo_empty_selection_changes_nothing() -> Result<()> {
        let mut controller = controller();
        assert!(controller.undo_selected()?.is_empty());
        assert!(controller.model().transactions().is_empty());

        let mut controller = controller_with_three();
        let before = controller.model().transactions();
        assert!(controller.undo_transaction(&[])?.is_empty());
        assert_eq!(before, controller.model().transactions());
        Ok(())
    }

    #[test]
    fn test_undo_out_of_range_is_all_or_nothing() {
        let mut controller = controller_with_three();
        let res = controller.undo_transaction(&[0, 3]);

        assert_eq!(res, Err(TrackerError::RowOutOfRange { row: 3, len: 3 }));
        assert_eq!(controller.model().len(), 3);
    }

    #[test]
    fn test_remove_transaction_by_id() -> Result<()> {
        let mut controller = controller();
        let id = controller.try_add_transaction(dec!(12.5), "bills")?;

        controller.remove_transaction(id)?;
        assert!(controller.model().is_empty());
        assert_eq!(controller.view().row_count(), 0);
        assert!(controller.remove_transaction(id).is_err());
        Ok(())
    }
}

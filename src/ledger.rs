use rust_decimal::Decimal;

use crate::{
    errors::TrackerError,
    models::{Transaction, TransactionId},
};

/// Ordered collection of the session's transactions, insertion order preserved.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends `transaction` and stamps it with a fresh id.
    ///
    /// Ids are never reused, even after the transaction carrying one is removed.
    pub fn add_transaction(&mut self, transaction: Transaction) -> TransactionId {
        let id = TransactionId::new(self.next_id.max(1));
        self.next_id = id.value() + 1;

        let transaction = transaction.with_id(id);
        tracing::debug!(
            %id,
            amount = %transaction.amount(),
            category = %transaction.category(),
            "transaction added"
        );
        self.transactions.push(transaction);
        id
    }

    /// Removes the transaction carrying `id`.
    ///
    /// # Errors
    /// [`TrackerError::TransactionNotFound`] if no such transaction exists,
    /// in which case the ledger is left untouched.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<Transaction, TrackerError> {
        let position = self
            .transactions
            .iter()
            .position(|tx| *tx.id() == id)
            .ok_or(TrackerError::TransactionNotFound(id))?;

        let removed = self.transactions.remove(position);
        tracing::debug!(%id, "transaction removed");
        Ok(removed)
    }

    /// Snapshot of the current transactions. Later mutations of the ledger
    /// do not show up in the returned vector.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, row: usize) -> Option<&Transaction> {
        self.transactions.get(row)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total_cost(&self) -> Decimal {
        self.transactions.iter().map(|tx| *tx.amount()).sum()
    }
}

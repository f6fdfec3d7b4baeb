use std::fmt::Debug;

use rust_decimal::Decimal;

use crate::models::Transaction;

/// Predicate selecting the transactions that get highlighted in the table.
pub trait TransactionFilter: Debug {
    fn matches(&self, transaction: &Transaction) -> bool;

    /// Keeps the matching transactions, in their original order.
    fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }

    /// Positions of the matching transactions in `transactions`.
    fn matching_rows(&self, transactions: &[Transaction]) -> Vec<usize> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| self.matches(tx))
            .map(|(row, _)| row)
            .collect()
    }
}

/// Matches transactions whose amount equals the threshold exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFilter {
    amount: Decimal,
}

impl AmountFilter {
    pub fn new(amount: Decimal) -> Self {
        AmountFilter { amount }
    }
}

impl TransactionFilter for AmountFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        *transaction.amount() == self.amount
    }
}

/// Matches transactions of one category. Comparison is case sensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        CategoryFilter {
            category: category.into(),
        }
    }
}

impl TransactionFilter for CategoryFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        transaction.category() == &self.category
    }
}

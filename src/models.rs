use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use getset::Getters;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// Format used to display and parse transaction timestamps, e.g. `18-10-2026 09:41`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

fn round_two_decimals<S>(x: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&format!("{x:.2}"))
}

/// Stable identifier of a transaction inside a [`crate::ledger::Ledger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Id carried by a transaction that has not been inserted into a ledger yet.
    pub const UNASSIGNED: TransactionId = TransactionId(0);

    pub fn new(id: u64) -> Self {
        TransactionId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single expense. Fields are fixed once the transaction is created;
/// removing it from the ledger is the only way to get rid of it.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct Transaction {
    #[getset(get = "pub")]
    id: TransactionId,
    #[getset(get = "pub")]
    amount: Decimal,
    #[getset(get = "pub")]
    category: String,
    #[getset(get = "pub")]
    timestamp: DateTime<Local>,
}

impl Transaction {
    /// Creates a transaction stamped with the current local time.
    ///
    /// No validation happens here, see [`validate_amount`] and
    /// [`validate_category`]. The id stays [`TransactionId::UNASSIGNED`]
    /// until the transaction is added to a ledger.
    pub fn new(amount: Decimal, category: impl Into<String>) -> Self {
        Transaction {
            id: TransactionId::UNASSIGNED,
            amount,
            category: category.into(),
            timestamp: Local::now(),
        }
    }

    pub(crate) fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Parses a timestamp produced by [`Transaction::timestamp_string`].
pub fn parse_timestamp(value: &str) -> Result<DateTime<Local>, TrackerError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .ok_or_else(|| TrackerError::InvalidTimestamp(value.to_string()))
}

pub fn validate_amount(amount: Decimal) -> Result<(), TrackerError> {
    if amount <= Decimal::ZERO {
        return Err(TrackerError::InvalidAmount(amount));
    }
    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), TrackerError> {
    if category.is_empty() {
        return Err(TrackerError::EmptyCategory);
    }
    Ok(())
}

/// Raw expense as read from an input CSV file (`amount,category`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct NewExpense {
    #[getset(get = "pub")]
    amount: String,
    #[getset(get = "pub")]
    category: String,
}

/// One rendered line of the transactions table.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct ExpenseRow {
    #[getset(get = "pub")]
    serial: usize,
    #[getset(get = "pub")]
    #[serde(serialize_with = "round_two_decimals")]
    amount: Decimal,
    #[getset(get = "pub")]
    category: String,
    #[getset(get = "pub")]
    date: String,
    #[getset(get = "pub")]
    highlighted: bool,
}

impl ExpenseRow {
    /// Builds the table row for `transaction` at zero based position `row`.
    pub fn from_transaction(row: usize, transaction: &Transaction) -> Self {
        ExpenseRow {
            serial: row + 1,
            amount: transaction.amount,
            category: transaction.category.clone(),
            date: transaction.timestamp_string(),
            highlighted: false,
        }
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionId;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("invalid amount {0}: amount must be greater than zero")]
    InvalidAmount(Decimal),

    #[error("category must not be empty")]
    EmptyCategory,

    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),

    #[error("row {row} is out of range, table has {len} rows")]
    RowOutOfRange { row: usize, len: usize },

    #[error("cannot parse timestamp {0:?}")]
    InvalidTimestamp(String),
}

//! Expense tracker: a ledger of expenses, filters that highlight matching
//! rows and a controller tying both to a table view.

pub mod cli;
pub mod controller;
pub mod csv_writer;
pub mod errors;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod processor;
pub mod traits;
pub mod view;

pub use controller::Controller;
pub use errors::TrackerError;
pub use filter::{AmountFilter, CategoryFilter, TransactionFilter};
pub use ledger::Ledger;
pub use models::{Transaction, TransactionId};
pub use traits::TransactionView;
pub use view::{Color, TableView};

//! The transaction ledger: the model, its SQL, and the route handlers.

mod db;
mod endpoints;
mod models;

pub use db::{
    create_transaction_table, delete_transaction, insert_transaction,
    list_account_transactions, list_transactions_in_period, map_row_to_transaction,
    update_transaction,
};
pub use endpoints::{
    create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
    list_account_transactions_endpoint, period_endpoint, update_transaction_endpoint,
};
pub use models::{
    CreateTransaction, Transaction, TransactionId, TransactionKind, UpdateTransaction,
};

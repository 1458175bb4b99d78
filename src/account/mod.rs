//! Financial accounts: the model, its SQL, the derived balance, and the
//! route handlers.

mod balance;
mod db;
mod endpoints;
mod models;

pub use balance::{Balance, compute_balance};
pub use db::{
    create_account_table, delete_account, insert_account, list_accounts, map_row_to_account,
    update_account,
};
pub use endpoints::{
    create_account_endpoint, delete_account_endpoint, get_account_endpoint, get_balance_endpoint,
    list_accounts_endpoint, update_account_endpoint,
};
pub use models::{Account, AccountId, CreateAccount, UpdateAccount};

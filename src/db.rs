//! Sets up the application database.

use rusqlite::Connection;

use crate::{Error, account, category, transaction, user};

/// The category names seeded as shared categories on first run.
///
/// Shared categories have no owner and are visible to every user.
const DEFAULT_SHARED_CATEGORIES: [&str; 10] = [
    "Groceries",
    "Transportation",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Shopping",
    "Restaurants",
    "Salary",
    "Investment",
    "Other",
];

/// Create the tables and seed data for the application.
///
/// Safe to call on an existing database, tables are only created when absent.
///
/// # Errors
///
/// Returns an error if the SQL transaction could not be created or committed,
/// or if there was an unexpected SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Referential integrity (cascading deletes, nulling category references)
    // relies on this pragma. It must be set outside a transaction.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let sql_transaction = rusqlite::Transaction::new_unchecked(
        connection,
        rusqlite::TransactionBehavior::Exclusive,
    )?;

    user::create_user_table(&sql_transaction)?;
    account::create_account_table(&sql_transaction)?;
    category::create_category_table(&sql_transaction)?;
    transaction::create_transaction_table(&sql_transaction)?;

    seed_shared_categories(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}

/// Insert the default shared categories if the category table is empty.
fn seed_shared_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let count: i64 =
        connection.query_row("SELECT COUNT(id) FROM category", [], |row| row.get(0))?;

    if count > 0 {
        return Ok(());
    }

    for name in DEFAULT_SHARED_CATEGORIES {
        connection.execute(
            "INSERT INTO category (user_id, name) VALUES (NULL, ?1)",
            (name,),
        )?;
    }

    Ok(())
}

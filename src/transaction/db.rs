//! SQL for the transaction ledger.
//!
//! Every query scopes to the requesting user, either directly for rows
//! addressed by account, or through a join onto the account table for rows
//! addressed by transaction id.

use rusqlite::{Connection, Row, named_params, params};
use time::{Date, OffsetDateTime};

use crate::{
    Error, account::Account, category::Category, ownership::ResolveOwned, user::UserID,
};

use super::models::{CreateTransaction, Transaction, TransactionId, UpdateTransaction};

/// Create the transaction table in the database at `connection`.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                account_id INTEGER NOT NULL,
                category_id INTEGER,
                value REAL NOT NULL,
                kind TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id)
                    ON UPDATE CASCADE
                    ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id)
                    ON UPDATE CASCADE
                    ON DELETE SET NULL
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row into a [Transaction].
///
/// The columns must be in the order `id, account_id, category_id, value,
/// kind, date, description, created_at`.
pub fn map_row_to_transaction(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        account_id: row.get(1)?,
        category_id: row.get(2)?,
        value: row.get(3)?,
        kind: row.get(4)?,
        date: row.get(5)?,
        description: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Record a new transaction for `requester` in the database at `connection`.
///
/// The referenced account, and category when present, must resolve for
/// `requester` before anything is written.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account or category is absent or not
/// visible to `requester`, or a validation error for a bad payload.
pub fn insert_transaction(
    connection: &Connection,
    requester: UserID,
    payload: &CreateTransaction,
) -> Result<Transaction, Error> {
    payload.validate()?;

    Account::resolve_owned(connection, payload.account_id, requester)?;

    if let Some(category_id) = payload.category_id {
        Category::resolve_owned(connection, category_id, requester)?;
    }

    let date = payload
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO \"transaction\"
                (account_id, category_id, value, kind, date, description, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            payload.account_id,
            payload.category_id,
            payload.value,
            payload.kind,
            date,
            payload.description,
            created_at
        ],
    )?;

    Ok(Transaction {
        id: connection.last_insert_rowid(),
        account_id: payload.account_id,
        category_id: payload.category_id,
        value: payload.value,
        kind: payload.kind,
        date,
        description: payload.description.clone(),
        created_at,
    })
}

impl ResolveOwned for Transaction {
    fn resolve_owned(connection: &Connection, id: i64, requester: UserID) -> Result<Self, Error> {
        connection
            .prepare(
                "SELECT t.id, t.account_id, t.category_id, t.value, t.kind, t.date,
                        t.description, t.created_at
                    FROM \"transaction\" t
                    INNER JOIN account a ON t.account_id = a.id
                    WHERE t.id = :id AND a.user_id = :user_id",
            )?
            .query_row(
                named_params! { ":id": id, ":user_id": requester.as_i64() },
                map_row_to_transaction,
            )
            .map_err(|error| error.into())
    }
}

/// Get an account's transactions, newest first with ties broken by id.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account is absent or not owned by
/// `requester`.
pub fn list_account_transactions(
    connection: &Connection,
    account_id: i64,
    requester: UserID,
) -> Result<Vec<Transaction>, Error> {
    Account::resolve_owned(connection, account_id, requester)?;

    connection
        .prepare(
            "SELECT id, account_id, category_id, value, kind, date, description, created_at
                FROM \"transaction\"
                WHERE account_id = :account_id
                ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":account_id", &account_id)], map_row_to_transaction)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get all of `requester`'s transactions dated within `start..=end`, across
/// all their accounts, newest first with ties broken by id.
///
/// # Errors
///
/// Returns [Error::InvalidDateRange] if `start` is after `end`.
pub fn list_transactions_in_period(
    connection: &Connection,
    requester: UserID,
    start: Date,
    end: Date,
) -> Result<Vec<Transaction>, Error> {
    if start > end {
        return Err(Error::InvalidDateRange);
    }

    connection
        .prepare(
            "SELECT t.id, t.account_id, t.category_id, t.value, t.kind, t.date,
                    t.description, t.created_at
                FROM \"transaction\" t
                INNER JOIN account a ON t.account_id = a.id
                WHERE a.user_id = :user_id AND t.date BETWEEN :start AND :end
                ORDER BY t.date DESC, t.id DESC",
        )?
        .query_map(
            named_params! { ":user_id": requester.as_i64(), ":start": start, ":end": end },
            map_row_to_transaction,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Apply a partial update to a transaction and return the updated row.
///
/// A new category must resolve for `requester` before it is written.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction is absent or belongs to
/// another user's account, or a validation error for a bad payload.
pub fn update_transaction(
    connection: &Connection,
    id: TransactionId,
    requester: UserID,
    payload: &UpdateTransaction,
) -> Result<Transaction, Error> {
    payload.validate()?;

    let mut transaction = Transaction::resolve_owned(connection, id, requester)?;

    if let Some(category_id) = payload.category_id {
        Category::resolve_owned(connection, category_id, requester)?;
        transaction.category_id = Some(category_id);
    }

    if let Some(value) = payload.value {
        transaction.value = value;
    }

    if let Some(kind) = payload.kind {
        transaction.kind = kind;
    }

    if let Some(date) = payload.date {
        transaction.date = date;
    }

    if let Some(description) = &payload.description {
        transaction.description = description.clone();
    }

    connection.execute(
        "UPDATE \"transaction\"
                SET category_id = ?1, value = ?2, kind = ?3, date = ?4, description = ?5
                WHERE id = ?6",
        params![
            transaction.category_id,
            transaction.value,
            transaction.kind,
            transaction.date,
            transaction.description,
            id
        ],
    )?;

    Ok(transaction)
}

/// Delete a transaction from one of `requester`'s accounts.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction is absent or belongs to
/// another user's account. Deleting a missing transaction is never a silent
/// success.
pub fn delete_transaction(
    connection: &Connection,
    id: TransactionId,
    requester: UserID,
) -> Result<(), Error> {
    // DELETE cannot join, so the ownership scope goes through a subquery.
    let rows_deleted = connection.execute(
        "DELETE FROM \"transaction\"
                WHERE id = ?1
                AND account_id IN (SELECT id FROM account WHERE user_id = ?2)",
        params![id, requester.as_i64()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

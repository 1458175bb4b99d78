//! SQL for creating, reading, updating and deleting accounts.

use rusqlite::{Connection, Row, named_params, params};
use time::OffsetDateTime;

use crate::{Error, ownership::ResolveOwned, user::UserID};

use super::models::{Account, AccountId, CreateAccount, UpdateAccount};

/// Create the account table in the database at `connection`.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                initial_amount REAL NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, name),
                FOREIGN KEY(user_id) REFERENCES user(id)
                    ON UPDATE CASCADE
                    ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row into an [Account].
///
/// The columns must be in the order `id, user_id, name, initial_amount,
/// created_at, updated_at`.
pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        name: row.get(2)?,
        initial_amount: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Create a new account for `owner` in the database at `connection`.
///
/// # Errors
///
/// Returns [Error::DuplicateAccountName] if `owner` already has an account
/// with the same name, or a validation error for a bad payload.
pub fn insert_account(
    connection: &Connection,
    owner: UserID,
    payload: &CreateAccount,
) -> Result<Account, Error> {
    payload.validate()?;

    let now = OffsetDateTime::now_utc();

    connection
        .execute(
            "INSERT INTO account (user_id, name, initial_amount, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)",
            params![owner.as_i64(), payload.name, payload.initial_amount, now, now],
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 2067 =>
            {
                Error::DuplicateAccountName(payload.name.clone())
            }
            error => error.into(),
        })?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        user_id: owner,
        name: payload.name.clone(),
        initial_amount: payload.initial_amount,
        created_at: now,
        updated_at: now,
    })
}

/// Get all accounts owned by `owner` from the database at `connection`.
pub fn list_accounts(connection: &Connection, owner: UserID) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, initial_amount, created_at, updated_at
                FROM account WHERE user_id = :user_id",
        )?
        .query_map(&[(":user_id", &owner.as_i64())], map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

impl ResolveOwned for Account {
    fn resolve_owned(connection: &Connection, id: i64, requester: UserID) -> Result<Self, Error> {
        connection
            .prepare(
                "SELECT id, user_id, name, initial_amount, created_at, updated_at
                    FROM account WHERE id = :id AND user_id = :user_id",
            )?
            .query_row(
                named_params! { ":id": id, ":user_id": requester.as_i64() },
                map_row_to_account,
            )
            .map_err(|error| error.into())
    }
}

/// Apply a partial update to an account owned by `requester` and return the
/// updated account.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account is absent or owned by someone
/// else, and [Error::DuplicateAccountName] if a rename collides with another
/// of the requester's accounts.
pub fn update_account(
    connection: &Connection,
    id: AccountId,
    requester: UserID,
    payload: &UpdateAccount,
) -> Result<Account, Error> {
    payload.validate()?;

    let mut account = Account::resolve_owned(connection, id, requester)?;

    if let Some(name) = &payload.name {
        account.name = name.clone();
    }

    if let Some(initial_amount) = payload.initial_amount {
        account.initial_amount = initial_amount;
    }

    account.updated_at = OffsetDateTime::now_utc();

    connection
        .execute(
            "UPDATE account SET name = ?1, initial_amount = ?2, updated_at = ?3
                WHERE id = ?4 AND user_id = ?5",
            params![
                account.name,
                account.initial_amount,
                account.updated_at,
                id,
                requester.as_i64()
            ],
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 2067 =>
            {
                Error::DuplicateAccountName(account.name.clone())
            }
            error => error.into(),
        })?;

    Ok(account)
}

/// Delete an account owned by `requester`.
///
/// The account's transactions are deleted with it via the foreign key
/// cascade.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account is absent or owned by someone
/// else. Deleting a missing account is never a silent success.
pub fn delete_account(
    connection: &Connection,
    id: AccountId,
    requester: UserID,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM account WHERE id = ?1 AND user_id = ?2",
        params![id, requester.as_i64()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

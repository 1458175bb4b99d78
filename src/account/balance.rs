//! The balance engine.
//!
//! Balances are derived from the ledger on every read. No balance is ever
//! persisted or cached, so a balance cannot go stale or drift from the
//! transactions that make it up; the cost is one aggregate query per read,
//! which is fine at personal-finance volumes.

use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, ownership::ResolveOwned, user::UserID};

use super::models::{Account, AccountId};

/// An account's balance, broken into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balance {
    /// The balance the account started with.
    pub initial_amount: f64,
    /// The net effect of every transaction on the account. Incomes add their
    /// value, expenses subtract it.
    pub transactions_sum: f64,
    /// `initial_amount` plus `transactions_sum`.
    pub current_balance: f64,
}

/// Compute the balance of the account `id` as seen by `requester`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the account is absent or not owned by
/// `requester`; no balance is computed in that case.
pub fn compute_balance(
    connection: &Connection,
    id: AccountId,
    requester: UserID,
) -> Result<Balance, Error> {
    let account = Account::resolve_owned(connection, id, requester)?;

    let transactions_sum: f64 = connection
        .prepare(
            "SELECT COALESCE(SUM(CASE WHEN kind = 'income' THEN value ELSE -value END), 0)
                FROM \"transaction\" WHERE account_id = :account_id",
        )?
        .query_row(&[(":account_id", &id)], |row| row.get(0))?;

    Ok(Balance {
        initial_amount: account.initial_amount,
        transactions_sum,
        current_balance: account.initial_amount + transactions_sum,
    })
}

#[cfg(test)]
mod balance_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        account::{CreateAccount, insert_account},
        db::initialize,
        password::PasswordHash,
        transaction::{CreateTransaction, TransactionKind, delete_transaction, insert_transaction},
        user::{User, insert_user},
    };

    use super::{Balance, compute_balance};

    fn init_db() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn create_user(connection: &Connection, email: &str) -> User {
        insert_user(
            connection,
            email.parse().unwrap(),
            PasswordHash::new_unchecked("dummy hash"),
            "",
        )
        .unwrap()
    }

    fn record(
        connection: &Connection,
        user: &User,
        account_id: i64,
        value: f64,
        kind: TransactionKind,
    ) -> i64 {
        insert_transaction(
            connection,
            user.id,
            &CreateTransaction {
                account_id,
                category_id: None,
                value,
                kind,
                date: None,
                description: String::new(),
            },
        )
        .unwrap()
        .id
    }

    #[test]
    fn balance_of_empty_ledger_is_initial_amount() {
        let connection = init_db();
        let user = create_user(&connection, "hello@world.com");
        let account = insert_account(
            &connection,
            user.id,
            &CreateAccount {
                name: "Wallet".to_owned(),
                initial_amount: 100.0,
            },
        )
        .unwrap();

        let balance = compute_balance(&connection, account.id, user.id).unwrap();

        assert_eq!(
            balance,
            Balance {
                initial_amount: 100.0,
                transactions_sum: 0.0,
                current_balance: 100.0,
            }
        );
    }

    #[test]
    fn balance_tracks_incomes_expenses_and_deletes() {
        let connection = init_db();
        let user = create_user(&connection, "hello@world.com");
        let account = insert_account(
            &connection,
            user.id,
            &CreateAccount {
                name: "Wallet".to_owned(),
                initial_amount: 100.0,
            },
        )
        .unwrap();

        record(&connection, &user, account.id, 50.0, TransactionKind::Income);
        let balance = compute_balance(&connection, account.id, user.id).unwrap();
        assert_eq!(balance.current_balance, 150.0);

        let expense_id = record(&connection, &user, account.id, 30.0, TransactionKind::Expense);
        let balance = compute_balance(&connection, account.id, user.id).unwrap();
        assert_eq!(balance.current_balance, 120.0);

        delete_transaction(&connection, expense_id, user.id).unwrap();
        let balance = compute_balance(&connection, account.id, user.id).unwrap();
        assert_eq!(balance.current_balance, 150.0);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let connection = init_db();
        let user = create_user(&connection, "hello@world.com");
        let account = insert_account(
            &connection,
            user.id,
            &CreateAccount {
                name: "Wallet".to_owned(),
                initial_amount: 12.34,
            },
        )
        .unwrap();
        record(&connection, &user, account.id, 5.0, TransactionKind::Income);

        let first = compute_balance(&connection, account.id, user.id).unwrap();
        let second = compute_balance(&connection, account.id, user.id).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn balance_of_foreign_account_is_not_found() {
        let connection = init_db();
        let alice = create_user(&connection, "alice@example.com");
        let bob = create_user(&connection, "bob@example.com");
        let account = insert_account(
            &connection,
            alice.id,
            &CreateAccount {
                name: "Wallet".to_owned(),
                initial_amount: 100.0,
            },
        )
        .unwrap();

        assert_eq!(
            compute_balance(&connection, account.id, bob.id),
            Err(Error::NotFound)
        );
    }
}

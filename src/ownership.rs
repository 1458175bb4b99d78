//! The ownership guard: resolve an entity by id and authorize it for a user
//! in a single step.
//!
//! Every read and mutation funnels through [ResolveOwned], so the rules for
//! who may see what live in exactly one place per entity. A row that does not
//! exist and a row owned by someone else produce the same
//! [Error::NotFound](crate::Error::NotFound), so responses never reveal
//! whether another user's data exists.

use rusqlite::Connection;

use crate::{Error, user::UserID};

/// Resolve an entity by id, scoped to the requesting user.
pub trait ResolveOwned: Sized {
    /// Fetch the entity with `id` if, and only if, `requester` may access it.
    ///
    /// Accounts must be owned by `requester`, categories must be owned by
    /// `requester` or shared, and transactions resolve through their account's
    /// owner.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound](crate::Error::NotFound) when the entity is
    /// absent or not visible to `requester`.
    fn resolve_owned(connection: &Connection, id: i64, requester: UserID) -> Result<Self, Error>;
}

#[cfg(test)]
mod resolve_owned_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        account::{Account, CreateAccount, insert_account},
        category::{Category, CreateCategory, insert_category},
        db::initialize,
        ownership::ResolveOwned,
        password::PasswordHash,
        transaction::{CreateTransaction, Transaction, TransactionKind, insert_transaction},
        user::{User, UserID, insert_user},
    };

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

    fn create_account(connection: &Connection, owner: UserID) -> Account {
        insert_account(
            connection,
            owner,
            &CreateAccount {
                name: "Checking".to_owned(),
                initial_amount: 0.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn account_resolves_for_owner_only() {
        let connection = init_db();
        let owner = create_user(&connection, "owner@example.com");
        let other = create_user(&connection, "other@example.com");
        let account = create_account(&connection, owner.id);

        let resolved = Account::resolve_owned(&connection, account.id, owner.id).unwrap();
        assert_eq!(resolved.id, account.id);
        assert_eq!(resolved.user_id, owner.id);
        assert_eq!(resolved.name, account.name);

        assert_eq!(
            Account::resolve_owned(&connection, account.id, other.id),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn category_resolves_for_owner_and_everyone_when_shared() {
        let connection = init_db();
        let owner = create_user(&connection, "owner@example.com");
        let other = create_user(&connection, "other@example.com");

        let owned = insert_category(
            &connection,
            owner.id,
            &CreateCategory {
                name: "Board games".to_owned(),
            },
        )
        .unwrap();

        assert!(Category::resolve_owned(&connection, owned.id, owner.id).is_ok());
        assert_eq!(
            Category::resolve_owned(&connection, owned.id, other.id),
            Err(Error::NotFound)
        );

        // Seeded categories have no owner and are visible to every user.
        let shared_id: i64 = connection
            .query_row(
                "SELECT id FROM category WHERE user_id IS NULL LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert!(Category::resolve_owned(&connection, shared_id, owner.id).is_ok());
        assert!(Category::resolve_owned(&connection, shared_id, other.id).is_ok());
    }

    #[test]
    fn transaction_resolves_through_account_owner() {
        let connection = init_db();
        let owner = create_user(&connection, "owner@example.com");
        let other = create_user(&connection, "other@example.com");
        let account = create_account(&connection, owner.id);

        let transaction = insert_transaction(
            &connection,
            owner.id,
            &CreateTransaction {
                account_id: account.id,
                category_id: None,
                value: 12.5,
                kind: TransactionKind::Expense,
                date: None,
                description: String::new(),
            },
        )
        .unwrap();

        assert!(Transaction::resolve_owned(&connection, transaction.id, owner.id).is_ok());
        assert_eq!(
            Transaction::resolve_owned(&connection, transaction.id, other.id),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn missing_ids_resolve_to_not_found() {
        let connection = init_db();
        let user = create_user(&connection, "someone@example.com");

        assert_eq!(
            Account::resolve_owned(&connection, 999, user.id),
            Err(Error::NotFound)
        );
        assert_eq!(
            Category::resolve_owned(&connection, 999, user.id),
            Err(Error::NotFound)
        );
        assert_eq!(
            Transaction::resolve_owned(&connection, 999, user.id),
            Err(Error::NotFound)
        );
    }
}

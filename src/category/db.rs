//! SQL for creating, reading, updating and deleting categories.

use rusqlite::{Connection, Row, named_params, params};

use crate::{Error, ownership::ResolveOwned, user::UserID};

use super::models::{Category, CategoryId, CreateCategory, UpdateCategory};

/// Create the category table in the database at `connection`.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                user_id INTEGER,
                name TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id)
                    ON UPDATE CASCADE
                    ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row into a [Category].
///
/// The columns must be in the order `id, user_id, name`.
pub fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get::<_, Option<i64>>(1)?.map(UserID::new),
        name: row.get(2)?,
    })
}

/// Whether `name` is already taken by one of `owner`'s categories or a shared
/// category, excluding the row with id `exclude` if given.
///
/// Uniqueness spans both scopes so that a user cannot shadow "Groceries"
/// with a private category of the same name.
fn name_taken(
    connection: &Connection,
    owner: UserID,
    name: &str,
    exclude: Option<CategoryId>,
) -> Result<bool, Error> {
    let count: i64 = connection
        .prepare(
            "SELECT COUNT(id) FROM category
                WHERE (user_id = :user_id OR user_id IS NULL)
                AND name = :name
                AND id != :exclude",
        )?
        .query_row(
            named_params! {
                ":user_id": owner.as_i64(),
                ":name": name,
                ":exclude": exclude.unwrap_or(-1),
            },
            |row| row.get(0),
        )?;

    Ok(count > 0)
}

/// Create a new category for `owner` in the database at `connection`.
///
/// # Errors
///
/// Returns [Error::DuplicateCategoryName] if the name collides with one of
/// `owner`'s categories or a shared category.
pub fn insert_category(
    connection: &Connection,
    owner: UserID,
    payload: &CreateCategory,
) -> Result<Category, Error> {
    payload.validate()?;

    if name_taken(connection, owner, &payload.name, None)? {
        return Err(Error::DuplicateCategoryName(payload.name.clone()));
    }

    connection.execute(
        "INSERT INTO category (user_id, name) VALUES (?1, ?2)",
        params![owner.as_i64(), payload.name],
    )?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        user_id: Some(owner),
        name: payload.name.clone(),
    })
}

/// Get the categories visible to `requester`: their own plus the shared ones.
///
/// Shared categories sort first, then by name.
pub fn list_categories(connection: &Connection, requester: UserID) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name FROM category
                WHERE user_id = :user_id OR user_id IS NULL
                ORDER BY user_id, name",
        )?
        .query_map(&[(":user_id", &requester.as_i64())], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

impl ResolveOwned for Category {
    fn resolve_owned(connection: &Connection, id: i64, requester: UserID) -> Result<Self, Error> {
        connection
            .prepare(
                "SELECT id, user_id, name FROM category
                    WHERE id = :id AND (user_id = :user_id OR user_id IS NULL)",
            )?
            .query_row(
                named_params! { ":id": id, ":user_id": requester.as_i64() },
                map_row_to_category,
            )
            .map_err(|error| error.into())
    }
}

/// Rename a category owned by `requester` and return the updated category.
///
/// Shared categories cannot be renamed; they resolve for reading but not for
/// writing.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category is absent, owned by someone
/// else, or shared; [Error::DuplicateCategoryName] if the new name collides.
pub fn update_category(
    connection: &Connection,
    id: CategoryId,
    requester: UserID,
    payload: &UpdateCategory,
) -> Result<Category, Error> {
    payload.validate()?;

    // The row must resolve for the requester before the uniqueness check so
    // that a missing or foreign id reports NotFound rather than a name
    // conflict.
    Category::resolve_owned(connection, id, requester)?;

    if name_taken(connection, requester, &payload.name, Some(id))? {
        return Err(Error::DuplicateCategoryName(payload.name.clone()));
    }

    let rows_updated = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2 AND user_id = ?3",
        params![payload.name, id, requester.as_i64()],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(Category {
        id,
        user_id: Some(requester),
        name: payload.name.clone(),
    })
}

/// Delete a category owned by `requester`.
///
/// Transactions filed under the category keep existing with their category
/// reference nulled by the foreign key action. Shared categories cannot be
/// deleted.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category is absent, owned by someone
/// else, or shared.
pub fn delete_category(
    connection: &Connection,
    id: CategoryId,
    requester: UserID,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        params![id, requester.as_i64()],
    )?;

    if rows_deleted == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

//! This file defines a user of the application, its SQL, and the
//! registration endpoint.

use std::fmt::Display;

use axum::extract::State;
use email_address::EmailAddress;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    extract::Json,
    password::{PasswordHash, ValidatedPassword},
    response::ApiSuccess,
    state::AppState,
};

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Wrap a raw database id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the database.
    pub id: UserID,
    /// The unique email address the user registered with.
    pub email: EmailAddress,
    /// The user's display name. May be empty.
    pub name: String,
    /// The hash of the user's password. Never serialized.
    #[serde(skip)]
    pub password_hash: PasswordHash,
    /// When the user registered.
    pub created_at: OffsetDateTime,
    /// When the user row was last modified.
    pub updated_at: OffsetDateTime,
}

/// Create the user table in the database at `connection`.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Convert a row into a [User].
///
/// The columns must be in the order `id, email, password, name, created_at,
/// updated_at`.
pub fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_email: String = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        email: EmailAddress::new_unchecked(raw_email),
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        name: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Create a new user in the database at `connection` and return it.
///
/// # Errors
///
/// Returns [Error::DuplicateEmail] if `email` is already registered, or
/// [Error::SqlError] if there was an unexpected SQL error.
pub fn insert_user(
    connection: &Connection,
    email: EmailAddress,
    password_hash: PasswordHash,
    name: &str,
) -> Result<User, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .execute(
            "INSERT INTO user (email, password, name, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)",
            params![email.to_string(), password_hash.to_string(), name, now, now],
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            error => error.into(),
        })?;

    Ok(User {
        id: UserID::new(connection.last_insert_rowid()),
        email,
        name: name.to_owned(),
        password_hash,
        created_at: now,
        updated_at: now,
    })
}

/// Get the user from the database that has the specified `email` address.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn get_user_by_email(connection: &Connection, email: &str) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, email, password, name, created_at, updated_at
                FROM user WHERE email = :email",
        )?
        .query_row(&[(":email", &email)], map_row_to_user)
        .map_err(|error| error.into())
}

/// Get the user from the database that has the specified `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn get_user_by_id(connection: &Connection, id: UserID) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, email, password, name, created_at, updated_at
                FROM user WHERE id = :id",
        )?
        .query_row(&[(":id", &id.as_i64())], map_row_to_user)
        .map_err(|error| error.into())
}

/// The payload for registering a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The email address to register with. Must not already be registered.
    pub email: String,
    /// The plain-text password. Checked for strength before hashing.
    pub password: String,
    /// The user's display name.
    #[serde(default)]
    pub name: String,
}

/// A route handler for registering a new user.
///
/// The response is the created user without its password hash.
pub async fn register_endpoint(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<ApiSuccess<User>, Error> {
    let email: EmailAddress = form
        .email
        .parse()
        .map_err(|_| Error::InvalidEmail(form.email.clone()))?;
    let password = ValidatedPassword::new(&form.password)?;
    let password_hash = PasswordHash::new(password, PasswordHash::DEFAULT_COST)?;

    let connection = state.connection()?;
    let user = insert_user(&connection, email, password_hash, &form.name)?;

    Ok(ApiSuccess::created(user))
}


#[cfg(test)]
mod register_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{endpoints, test_utils::test_app};

    #[tokio::test]
    async fn register_creates_user() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": "new.user@example.com",
                "password": "averystrongpassword1",
                "name": "New User"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["email"], "new.user@example.com");
        assert_eq!(body["data"]["name"], "New User");
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": "not an email",
                "password": "averystrongpassword1"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": "weak@example.com",
                "password": "password"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let app = test_app();

        // The test fixture already registered this address.
        let response = app
            .server
            .post(endpoints::REGISTER)
            .json(&json!({
                "email": app.user.email.as_str(),
                "password": "averystrongpassword1"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}

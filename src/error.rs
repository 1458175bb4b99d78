//! The application error type and its mapping onto HTTP responses.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Whether internal fault detail is included in error responses.
static VERBOSE_ERRORS: AtomicBool = AtomicBool::new(false);

/// Include the underlying fault text in internal error responses.
///
/// Intended for development deployments; production keeps the generic
/// message and the detail stays in the server logs.
pub fn set_verbose_errors(enabled: bool) {
    VERBOSE_ERRORS.store(enabled, Ordering::Relaxed);
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for an account name.
    #[error("account name cannot be empty")]
    EmptyAccountName,

    /// An empty string was used for a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An account's initial amount was not a finite number.
    #[error("{0} is not a valid amount")]
    InvalidAmount(f64),

    /// A transaction value was zero, negative or non-finite.
    ///
    /// Transaction values are magnitudes; the direction is carried by the
    /// transaction kind.
    #[error("{0} is not a valid transaction value, values must be positive and finite")]
    InvalidTransactionValue(f64),

    /// An update payload contained no fields.
    #[error("at least one field must be provided")]
    EmptyUpdate,

    /// The request body or query string could not be deserialized.
    #[error("{0}")]
    MalformedRequest(String),

    /// A period query had its start date after its end date.
    #[error("the start date must not be after the end date")]
    InvalidDateRange,

    /// The string could not be parsed as an email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The email used for registration is already taken.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// The specified account name already exists for this user.
    #[error("the account \"{0}\" already exists")]
    DuplicateAccountName(String),

    /// The category name collides with one of the user's categories or a
    /// shared category.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The requested resource was absent or belongs to another user.
    ///
    /// The two cases are deliberately indistinguishable so that clients
    /// cannot enumerate other users' data.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {error}");
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyAccountName
            | Error::EmptyCategoryName
            | Error::InvalidAmount(_)
            | Error::InvalidTransactionValue(_)
            | Error::EmptyUpdate
            | Error::MalformedRequest(_)
            | Error::InvalidDateRange
            | Error::InvalidEmail(_)
            | Error::TooWeak(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateEmail
            | Error::DuplicateAccountName(_)
            | Error::DuplicateCategoryName(_) => StatusCode::CONFLICT,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::HashingError(_) | Error::DatabaseLockError | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {self}");

            if VERBOSE_ERRORS.load(Ordering::Relaxed) {
                self.to_string()
            } else {
                "Something went wrong, check the server logs for more details.".to_owned()
            }
        } else {
            self.to_string()
        };

        (status, Json(json!({ "status": "error", "message": message }))).into_response()
    }
}

//! The shared state handed to the router: the storage handle and the keys
//! used to sign and verify authentication tokens.

use std::sync::{Arc, Mutex, MutexGuard};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rusqlite::Connection;

use crate::Error;

/// The state of the API server.
///
/// Owns the database connection. Components receive the handle by injection
/// rather than through a global; the server binary decides when the
/// connection is opened and the state dropped.
#[derive(Clone)]
pub struct AppState {
    /// The database connection shared by all request handlers.
    pub db_connection: Arc<Mutex<Connection>>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AppState {
    /// Create the application state from an open database `connection` and
    /// the secret used for signing authentication tokens.
    pub fn new(connection: Connection, jwt_secret: &str) -> Self {
        Self {
            db_connection: Arc::new(Mutex::new(connection)),
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Acquire the database connection.
    ///
    /// # Errors
    ///
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|_| Error::DatabaseLockError)
    }

    /// The key for signing authentication tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The key for verifying authentication tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

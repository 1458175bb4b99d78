//! Password handling: a strength gate at the front, bcrypt behind it.
//!
//! Plain-text passwords only ever exist as [ValidatedPassword] values on
//! their way into a [PasswordHash]; nothing else in the crate touches them.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A plain-text password that cleared the strength gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Run the strength estimate over `raw_password` and wrap it if it
    /// scores high enough.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] for guessable passwords. The message carries
    /// the estimator's feedback so the client can tell the user what to
    /// change.
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        let analysis = zxcvbn(raw_password, &[]);

        match analysis.score() {
            Score::Three | Score::Four => Ok(Self(raw_password.to_string())),
            _ => Err(Error::TooWeak(
                analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }

    /// Wrap `raw_password` without the strength gate.
    ///
    /// Not `unsafe`: a weak password causes no memory problems, only weak
    /// credentials. The caller takes responsibility for that.
    pub fn new_unchecked(raw_password: &str) -> Self {
        Self(raw_password.to_string())
    }
}

// Redacted so a stray log line cannot leak credentials.
impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "********")
    }
}

/// A salted bcrypt hash of a validated password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The bcrypt cost used for real registrations. Tests use a lower cost
    /// to stay fast.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `password` with the given bcrypt `cost`.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the hashing library fails.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap a hash string read back from the database.
    pub fn new_unchecked(raw_hash: &str) -> Self {
        Self(raw_hash.to_string())
    }

    /// Validate and hash in one step.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        PasswordHash::new(ValidatedPassword::new(raw_password)?, cost)
    }

    /// Whether `raw_password` matches this hash.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! The account model and its request payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, user::UserID};

/// The id type for accounts.
pub type AccountId = i64;

/// A financial account owned by a user, e.g. a bank account or a wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The id of the owning user.
    pub user_id: UserID,
    /// The account name. Unique per owner.
    pub name: String,
    /// The balance the account started with, before any transaction.
    pub initial_amount: f64,
    /// When the account was created.
    pub created_at: OffsetDateTime,
    /// When the account was last modified.
    pub updated_at: OffsetDateTime,
}

/// The payload for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccount {
    /// The account name. Must not be empty.
    pub name: String,
    /// The starting balance.
    #[serde(default)]
    pub initial_amount: f64,
}

impl CreateAccount {
    /// Check the payload against the account validation rules.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyAccountName] for a blank name and
    /// [Error::InvalidAmount] for a non-finite starting balance.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyAccountName);
        }

        if !self.initial_amount.is_finite() {
            return Err(Error::InvalidAmount(self.initial_amount));
        }

        Ok(())
    }
}

/// A partial update to an account. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccount {
    /// The new account name.
    pub name: Option<String>,
    /// The new starting balance.
    pub initial_amount: Option<f64>,
}

impl UpdateAccount {
    /// Check the payload against the account validation rules.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyUpdate] when no field is present; present fields
    /// are checked by the same rules as account creation.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_none() && self.initial_amount.is_none() {
            return Err(Error::EmptyUpdate);
        }

        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(Error::EmptyAccountName);
        }

        if let Some(initial_amount) = self.initial_amount
            && !initial_amount.is_finite()
        {
            return Err(Error::InvalidAmount(initial_amount));
        }

        Ok(())
    }
}

//! The transaction model, its income/expense kind, and the request payloads.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, account::AccountId, category::CategoryId};

/// The id type for transactions.
pub type TransactionId = i64;

/// The direction of a transaction: money in or money out.
///
/// The direction lives here and nowhere else. Transaction values are always
/// positive magnitudes, and the balance engine applies the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the account.
    Income,
    /// Money leaving the account.
    Expense,
}

impl TransactionKind {
    /// The string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind: {other}").into(),
            )),
        }
    }
}

/// An income or expense recorded against an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The id for the transaction.
    pub id: TransactionId,
    /// The account the transaction belongs to.
    pub account_id: AccountId,
    /// The category the transaction is filed under, if any.
    pub category_id: Option<CategoryId>,
    /// The transaction's magnitude. Always positive.
    pub value: f64,
    /// Whether the value entered or left the account.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The day the transaction happened.
    pub date: Date,
    /// A free-text description.
    pub description: String,
    /// When the row was created.
    pub created_at: OffsetDateTime,
}

/// The payload for recording a new transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransaction {
    /// The account to record the transaction against. Must belong to the
    /// requester.
    pub account_id: AccountId,
    /// The category to file the transaction under, owned or shared.
    pub category_id: Option<CategoryId>,
    /// The transaction's magnitude. Must be positive and finite.
    pub value: f64,
    /// Whether this is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The day of the transaction. Defaults to today (UTC).
    pub date: Option<Date>,
    /// A free-text description.
    #[serde(default)]
    pub description: String,
}

impl CreateTransaction {
    /// Check the payload against the transaction validation rules.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTransactionValue] for a zero, negative or
    /// non-finite value.
    pub fn validate(&self) -> Result<(), Error> {
        validate_value(self.value)
    }
}

/// A partial update to a transaction. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransaction {
    /// The new magnitude.
    pub value: Option<f64>,
    /// The new direction.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// The new category to file the transaction under.
    pub category_id: Option<CategoryId>,
    /// The new transaction date.
    pub date: Option<Date>,
    /// The new description.
    pub description: Option<String>,
}

impl UpdateTransaction {
    /// Check the payload against the transaction validation rules.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyUpdate] when no field is present; a present value
    /// is checked by the same rule as transaction creation.
    pub fn validate(&self) -> Result<(), Error> {
        if self.value.is_none()
            && self.kind.is_none()
            && self.category_id.is_none()
            && self.date.is_none()
            && self.description.is_none()
        {
            return Err(Error::EmptyUpdate);
        }

        if let Some(value) = self.value {
            validate_value(value)?;
        }

        Ok(())
    }
}

fn validate_value(value: f64) -> Result<(), Error> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidTransactionValue(value));
    }

    Ok(())
}

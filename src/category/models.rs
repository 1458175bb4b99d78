//! The category model and its request payloads.

use serde::{Deserialize, Serialize};

use crate::{Error, user::UserID};

/// The id type for categories.
pub type CategoryId = i64;

/// A label that transactions can be filed under, e.g. "Groceries".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// The id for the category.
    pub id: CategoryId,
    /// The owning user, or [None] for a shared category visible to everyone.
    pub user_id: Option<UserID>,
    /// The category name. Unique across the owner's and the shared names.
    pub name: String,
}

/// The payload for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    /// The category name. Must not be empty.
    pub name: String,
}

impl CreateCategory {
    /// Check the payload against the category validation rules.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        Ok(())
    }
}

/// The payload for renaming a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategory {
    /// The new category name. Must not be empty.
    pub name: String,
}

impl UpdateCategory {
    /// Check the payload against the category validation rules.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyCategoryName);
        }

        Ok(())
    }
}

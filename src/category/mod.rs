//! Transaction categories: the model, its SQL, and the route handlers.
//!
//! Categories come in two flavours: owned categories, private to the user
//! that created them, and shared categories (no owner) that every user can
//! see and assign but nobody can change through the API.

mod db;
mod endpoints;
mod models;

pub use db::{
    create_category_table, delete_category, insert_category, list_categories,
    map_row_to_category, update_category,
};
pub use endpoints::{
    create_category_endpoint, delete_category_endpoint, get_category_endpoint,
    list_categories_endpoint, update_category_endpoint,
};
pub use models::{Category, CategoryId, CreateCategory, UpdateCategory};

//! Route handlers for the category endpoints.

use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::{
    Error, auth::Claims, extract::Json, ownership::ResolveOwned, response::ApiSuccess,
    state::AppState,
};

use super::{
    db::{delete_category, insert_category, list_categories, update_category},
    models::{Category, CategoryId, CreateCategory, UpdateCategory},
};

/// A route handler for creating a new category.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateCategory>,
) -> Result<ApiSuccess<Category>, Error> {
    let connection = state.connection()?;

    insert_category(&connection, claims.sub, &payload).map(ApiSuccess::created)
}

/// A route handler for listing the requester's categories plus the shared
/// ones.
pub async fn list_categories_endpoint(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<ApiSuccess<Vec<Category>>, Error> {
    let connection = state.connection()?;

    list_categories(&connection, claims.sub).map(ApiSuccess::ok)
}

/// A route handler for getting a single category by its id.
pub async fn get_category_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<CategoryId>,
) -> Result<ApiSuccess<Category>, Error> {
    let connection = state.connection()?;

    Category::resolve_owned(&connection, id, claims.sub).map(ApiSuccess::ok)
}

/// A route handler for renaming a category.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<CategoryId>,
    Json(payload): Json<UpdateCategory>,
) -> Result<ApiSuccess<Category>, Error> {
    let connection = state.connection()?;

    update_category(&connection, id, claims.sub, &payload).map(ApiSuccess::ok)
}

/// A route handler for deleting a category.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<CategoryId>,
) -> Result<ApiSuccess<Value>, Error> {
    let connection = state.connection()?;

    delete_category(&connection, id, claims.sub)?;

    Ok(ApiSuccess::ok(json!({ "message": "Category deleted successfully." })))
}

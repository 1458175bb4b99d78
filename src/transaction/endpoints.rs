//! Route handlers for the transaction endpoints.

use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};
use time::Date;

use crate::{
    Error,
    account::AccountId,
    auth::Claims,
    extract::{Json, Query},
    ownership::ResolveOwned,
    response::ApiSuccess,
    state::AppState,
};

use super::{
    db::{
        delete_transaction, insert_transaction, list_account_transactions,
        list_transactions_in_period, update_transaction,
    },
    models::{CreateTransaction, Transaction, TransactionId, UpdateTransaction},
};

/// A route handler for recording a new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateTransaction>,
) -> Result<ApiSuccess<Transaction>, Error> {
    let connection = state.connection()?;

    insert_transaction(&connection, claims.sub, &payload).map(ApiSuccess::created)
}

/// A route handler for getting a single transaction by its id.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<TransactionId>,
) -> Result<ApiSuccess<Transaction>, Error> {
    let connection = state.connection()?;

    Transaction::resolve_owned(&connection, id, claims.sub).map(ApiSuccess::ok)
}

/// A route handler for partially updating a transaction.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<TransactionId>,
    Json(payload): Json<UpdateTransaction>,
) -> Result<ApiSuccess<Transaction>, Error> {
    let connection = state.connection()?;

    update_transaction(&connection, id, claims.sub, &payload).map(ApiSuccess::ok)
}

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<TransactionId>,
) -> Result<ApiSuccess<Value>, Error> {
    let connection = state.connection()?;

    delete_transaction(&connection, id, claims.sub)?;

    Ok(ApiSuccess::ok(json!({ "message": "Transaction deleted successfully." })))
}

/// A route handler for listing an account's transactions, newest first.
pub async fn list_account_transactions_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(account_id): Path<AccountId>,
) -> Result<ApiSuccess<Vec<Transaction>>, Error> {
    let connection = state.connection()?;

    list_account_transactions(&connection, account_id, claims.sub).map(ApiSuccess::ok)
}

/// The query parameters of the period endpoint. Both dates are required.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    /// The first day of the period, inclusive.
    pub start: Date,
    /// The last day of the period, inclusive.
    pub end: Date,
}

/// A route handler for listing the requester's transactions within an
/// inclusive date range, across all their accounts.
pub async fn period_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<PeriodParams>,
) -> Result<ApiSuccess<Vec<Transaction>>, Error> {
    let connection = state.connection()?;

    list_transactions_in_period(&connection, claims.sub, params.start, params.end)
        .map(ApiSuccess::ok)
}

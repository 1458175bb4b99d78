//! Ties the route handlers to the route paths.

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    account::{
        create_account_endpoint, delete_account_endpoint, get_account_endpoint,
        get_balance_endpoint, list_accounts_endpoint, update_account_endpoint,
    },
    auth::log_in_endpoint,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    state::AppState,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_account_transactions_endpoint, period_endpoint, update_transaction_endpoint,
    },
    user::register_endpoint,
};

/// Return a router with all the app's routes.
///
/// Everything except the health check and the two auth routes requires a
/// bearer token; the individual handlers enforce this by taking a
/// [Claims](crate::auth::Claims) argument.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint))
        .route(
            endpoints::ACCOUNTS,
            post(create_account_endpoint).get(list_accounts_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint)
                .patch(update_account_endpoint)
                .delete(delete_account_endpoint),
        )
        .route(endpoints::ACCOUNT_BALANCE, get(get_balance_endpoint))
        .route(
            endpoints::CATEGORIES,
            post(create_category_endpoint).get(list_categories_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .patch(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .route(endpoints::TRANSACTIONS_PERIOD, get(period_endpoint))
        .route(
            endpoints::TRANSACTIONS_BY_ACCOUNT,
            get(list_account_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .patch(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .fallback(get_unknown_route)
        .with_state(state)
}

/// A route handler the load balancer can poll for liveness.
async fn get_health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "message": "API is healthy" })),
    )
}

/// The response for requests that match no route.
async fn get_unknown_route() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": "error", "message": "Route not found" })),
    )
}

//! Route handlers for the account endpoints.

use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::{
    Error, auth::Claims, extract::Json, ownership::ResolveOwned, response::ApiSuccess,
    state::AppState,
};

use super::{
    balance::{Balance, compute_balance},
    db::{delete_account, insert_account, list_accounts, update_account},
    models::{Account, AccountId, CreateAccount, UpdateAccount},
};

/// A route handler for creating a new account.
pub async fn create_account_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateAccount>,
) -> Result<ApiSuccess<Account>, Error> {
    let connection = state.connection()?;

    insert_account(&connection, claims.sub, &payload).map(ApiSuccess::created)
}

/// A route handler for listing the requester's accounts.
pub async fn list_accounts_endpoint(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<ApiSuccess<Vec<Account>>, Error> {
    let connection = state.connection()?;

    list_accounts(&connection, claims.sub).map(ApiSuccess::ok)
}

/// A route handler for getting a single account by its id.
pub async fn get_account_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<AccountId>,
) -> Result<ApiSuccess<Account>, Error> {
    let connection = state.connection()?;

    Account::resolve_owned(&connection, id, claims.sub).map(ApiSuccess::ok)
}

/// A route handler for partially updating an account.
pub async fn update_account_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<AccountId>,
    Json(payload): Json<UpdateAccount>,
) -> Result<ApiSuccess<Account>, Error> {
    let connection = state.connection()?;

    update_account(&connection, id, claims.sub, &payload).map(ApiSuccess::ok)
}

/// A route handler for deleting an account and, via the foreign key cascade,
/// its transactions.
pub async fn delete_account_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<AccountId>,
) -> Result<ApiSuccess<Value>, Error> {
    let connection = state.connection()?;

    delete_account(&connection, id, claims.sub)?;

    Ok(ApiSuccess::ok(json!({ "message": "Account deleted successfully." })))
}

/// A route handler for reading an account's balance, derived from its ledger.
pub async fn get_balance_endpoint(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<AccountId>,
) -> Result<ApiSuccess<Balance>, Error> {
    let connection = state.connection()?;

    compute_balance(&connection, id, claims.sub).map(ApiSuccess::ok)
}

#[cfg(test)]
mod account_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_user, test_app, token_for},
    };

    #[tokio::test]
    async fn create_account_returns_created_row() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "Wallet", "initial_amount": 100.0 }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["name"], "Wallet");
        assert_eq!(body["data"]["initial_amount"], 100.0);
        assert!(body["data"]["id"].as_i64().is_some());
    }

    #[tokio::test]
    async fn create_duplicate_account_returns_conflict() {
        let app = test_app();

        for expected_status in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let response = app
                .server
                .post(endpoints::ACCOUNTS)
                .authorization_bearer(&app.token)
                .json(&json!({ "name": "Wallet" }))
                .await;

            response.assert_status(expected_status);
        }
    }

    #[tokio::test]
    async fn create_account_with_blank_name_is_rejected() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_foreign_account_returns_not_found_without_data() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "Wallet" }))
            .await;
        let account_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

        let other = create_user(&app.state, "other@example.com");
        let other_token = token_for(&app.state, &other);

        let response = app
            .server
            .get(&format_endpoint(endpoints::ACCOUNT, account_id))
            .authorization_bearer(&other_token)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["status"], "error");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn update_account_with_empty_payload_is_rejected() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "Wallet" }))
            .await;
        let account_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

        let response = app
            .server
            .patch(&format_endpoint(endpoints::ACCOUNT, account_id))
            .authorization_bearer(&app.token)
            .json(&json!({}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn balance_endpoint_reports_derived_parts() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "Wallet", "initial_amount": 100.0 }))
            .await;
        let account_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

        app.server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&app.token)
            .json(&json!({
                "account_id": account_id,
                "value": 50.0,
                "type": "income"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app
            .server
            .get(&format_endpoint(endpoints::ACCOUNT_BALANCE, account_id))
            .authorization_bearer(&app.token)
            .await;

        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["initial_amount"], 100.0);
        assert_eq!(body["data"]["transactions_sum"], 50.0);
        assert_eq!(body["data"]["current_balance"], 150.0);
    }

    #[tokio::test]
    async fn delete_account_cascades_to_its_transactions() {
        let app = test_app();

        let response = app
            .server
            .post(endpoints::ACCOUNTS)
            .authorization_bearer(&app.token)
            .json(&json!({ "name": "Wallet" }))
            .await;
        let account_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

        let response = app
            .server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&app.token)
            .json(&json!({
                "account_id": account_id,
                "value": 5.0,
                "type": "expense"
            }))
            .await;
        let transaction_id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

        app.server
            .delete(&format_endpoint(endpoints::ACCOUNT, account_id))
            .authorization_bearer(&app.token)
            .await
            .assert_status_ok();

        app.server
            .get(&format_endpoint(endpoints::TRANSACTION, transaction_id))
            .authorization_bearer(&app.token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

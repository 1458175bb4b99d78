//! Contains the app's route paths as constants.

/// Liveness check.
pub const HEALTH: &str = "/api/v1/health";

/// Register a new user.
pub const REGISTER: &str = "/api/v1/auth/register";

/// Exchange credentials for a bearer token.
pub const LOG_IN: &str = "/api/v1/auth/login";

/// Create an account or list the requester's accounts.
pub const ACCOUNTS: &str = "/api/v1/accounts";

/// Read, update or delete a single account.
pub const ACCOUNT: &str = "/api/v1/accounts/{id}";

/// An account's balance, derived from its ledger.
pub const ACCOUNT_BALANCE: &str = "/api/v1/accounts/{id}/balance";

/// Create a category or list the requester's (and shared) categories.
pub const CATEGORIES: &str = "/api/v1/categories";

/// Read, update or delete a single category.
pub const CATEGORY: &str = "/api/v1/categories/{id}";

/// Record a new transaction.
pub const TRANSACTIONS: &str = "/api/v1/transactions";

/// Read, update or delete a single transaction.
pub const TRANSACTION: &str = "/api/v1/transactions/{id}";

/// List an account's transactions.
pub const TRANSACTIONS_BY_ACCOUNT: &str = "/api/v1/transactions/account/{account_id}";

/// List the requester's transactions within a date range.
pub const TRANSACTIONS_PERIOD: &str = "/api/v1/transactions/period";

/// Format a route containing `{id}` with a concrete id.
#[cfg(test)]
pub fn format_endpoint(endpoint: &str, id: i64) -> String {
    endpoint
        .replace("{id}", &id.to_string())
        .replace("{account_id}", &id.to_string())
}

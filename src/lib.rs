//! Moneta is a personal-finance bookkeeping service.
//!
//! Users register and authenticate, create financial accounts, record income
//! and expense transactions against categories, and read balances and period
//! summaries through a JSON API.
//!
//! The interesting parts are the balance engine ([account::compute_balance]),
//! which derives an account's balance from its ledger on every read, and the
//! ownership guard ([ownership::ResolveOwned]), which scopes every read and
//! mutation to the requesting user.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod account;
pub mod auth;
pub mod category;
pub mod db;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod ownership;
pub mod password;
pub mod response;
pub mod routing;
pub mod state;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test_utils;

pub use db::initialize as initialize_db;
pub use error::Error;
pub use routing::build_router;
pub use state::AppState;

/// Waits for ctrl+c or SIGTERM and then tells the server behind `handle` to
/// drain in-flight requests and stop.
///
/// Runs as a task alongside the serve loop in the server binary.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl+c handler");
        "ctrl+c"
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let signal_name = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };

    tracing::info!("Received {signal_name}, shutting down.");
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

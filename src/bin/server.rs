use std::{env, net::SocketAddr};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use moneta::{AppState, build_router, error, graceful_shutdown, initialize_db};

/// The deployment mode, which controls how much error detail reaches
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Mode {
    /// Internal fault detail is included in error responses.
    Development,
    /// Internal faults produce a generic message; detail stays in the logs.
    Production,
}

/// The JSON API server for moneta.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The deployment mode.
    #[arg(long, value_enum, default_value = "production")]
    mode: Mode,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    error::set_verbose_errors(args.mode == Mode::Development);

    let secret =
        env::var("JWT_SECRET").expect("The environment variable 'JWT_SECRET' must be set");

    let connection =
        Connection::open(&args.db_path).expect("Could not open the application database");
    initialize_db(&connection).expect("Could not initialize the application database");

    let state = AppState::new(connection, &secret);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {addr}");
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors get logged where they occur, so the layer's own 5xx logging
        // is redundant.
        .on_failure(());

    router.layer(tracing_layer)
}

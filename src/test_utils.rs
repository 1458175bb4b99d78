//! Shared fixtures for endpoint tests.

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    auth::encode_token,
    db::initialize,
    password::PasswordHash,
    routing::build_router,
    state::AppState,
    user::{User, insert_user},
};

/// The plain-text password of the fixture user created by [test_app].
pub const TEST_USER_PASSWORD: &str = "averystrongtestpassword1";

/// A running test server over a fresh in-memory database, with one
/// registered user and a valid bearer token for them.
pub struct TestApp {
    /// The server under test.
    pub server: TestServer,
    /// The application state backing the server.
    pub state: AppState,
    /// The fixture user.
    pub user: User,
    /// A bearer token for [TestApp::user].
    pub token: String,
}

/// Create a [TestApp] over an in-memory database.
pub fn test_app() -> TestApp {
    let connection = Connection::open_in_memory().expect("could not open in-memory database");
    initialize(&connection).expect("could not initialize database");

    let state = AppState::new(connection, "test jwt secret");
    let user = create_user(&state, "test@example.com");
    let token = token_for(&state, &user);

    let server = TestServer::new(build_router(state.clone()));

    TestApp {
        server,
        state,
        user,
        token,
    }
}

/// Register a user directly against the database, bypassing the endpoint.
///
/// Uses a low bcrypt cost to keep tests fast.
pub fn create_user(state: &AppState, email: &str) -> User {
    let connection = state.connection().unwrap();
    let password_hash = PasswordHash::from_raw_password(TEST_USER_PASSWORD, 4).unwrap();

    insert_user(&connection, email.parse().unwrap(), password_hash, "Test User").unwrap()
}

/// Issue a bearer token for `user`.
pub fn token_for(state: &AppState, user: &User) -> String {
    encode_token(user.id, state.encoding_key()).unwrap()
}

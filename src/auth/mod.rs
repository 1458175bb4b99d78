//! Authentication: checking credentials, issuing tokens, and the [Claims]
//! request extractor that protects routes.
//!
//! Handlers opt in to authentication by taking a [Claims] argument. The
//! extractor reads the `Authorization: Bearer` header and verifies the token
//! before the handler runs, so a handler holding a [Claims] value can trust
//! `claims.sub`.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

mod token;

pub use token::{Claims, TOKEN_DURATION, decode_token, encode_token};

use crate::{
    Error,
    extract::Json,
    response::ApiSuccess,
    state::AppState,
    user::{User, get_user_by_email},
};

/// The credentials a user logs in with.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The email the user registered with.
    pub email: String,
    /// The user's plain-text password.
    pub password: String,
}

/// The errors that can reject an authenticated request.
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// The email or password did not match a registered user.
    ///
    /// The two cases share one error so that log-in responses do not reveal
    /// which emails are registered.
    WrongCredentials,
    /// The request lacked a readable bearer token.
    MissingToken,
    /// The bearer token failed verification or has expired.
    InvalidToken,
    /// The token could not be created.
    TokenCreation,
    /// An unexpected failure while checking credentials.
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::WrongCredentials => (StatusCode::UNAUTHORIZED, "invalid email or password"),
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "you are not logged in"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid or expired token"),
            AuthError::TokenCreation => (StatusCode::INTERNAL_SERVER_ERROR, "token creation error"),
            AuthError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };

        (
            status,
            axum::Json(json!({ "status": "error", "message": message })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let state = AppState::from_ref(state);

        let token_data = decode_token(bearer.token(), state.decoding_key())
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

/// The payload returned by a successful log in.
#[derive(Debug, Serialize)]
pub struct LogInResponse {
    /// The bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user's public profile.
    pub user: User,
}

/// A route handler for logging in, exchanging credentials for a bearer token.
pub async fn log_in_endpoint(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<ApiSuccess<LogInResponse>, AuthError> {
    let user = {
        let connection = state.connection().map_err(|_| AuthError::InternalError)?;

        get_user_by_email(&connection, &credentials.email).map_err(|error| match error {
            Error::NotFound => AuthError::WrongCredentials,
            error => {
                tracing::error!("Error retrieving user: {error}");
                AuthError::InternalError
            }
        })?
    };

    let password_is_correct = user
        .password_hash
        .verify(&credentials.password)
        .map_err(|error| {
            tracing::error!("Error verifying password: {error}");
            AuthError::InternalError
        })?;

    if !password_is_correct {
        return Err(AuthError::WrongCredentials);
    }

    let token = encode_token(user.id, state.encoding_key())
        .map_err(|_| AuthError::TokenCreation)?;

    Ok(ApiSuccess::ok(LogInResponse { token, user }))
}

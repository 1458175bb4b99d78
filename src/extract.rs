//! Request extractors that reject malformed input with the application's
//! JSON error envelope.
//!
//! axum's own `Json` and `Query` rejections are plain text with their own
//! status codes. Every failure this API produces is enveloped, so handlers
//! take these wrappers instead; a body or query string that does not
//! deserialize becomes a validation error.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::Error;

/// A JSON request body.
///
/// Deserialization failures, including unknown enum variants such as an
/// unsupported transaction type, reject with 400 and the error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(request, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(Error::MalformedRequest(rejection.body_text())),
        }
    }
}

/// A deserialized query string.
///
/// Missing or unparsable parameters reject with 400 and the error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(Error::MalformedRequest(rejection.body_text())),
        }
    }
}

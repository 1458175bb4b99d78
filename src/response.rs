//! The JSON envelope returned by successful operations.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// A successful operation's payload, wrapped in the `status`/`data` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T>(StatusCode, T);

impl<T> ApiSuccess<T> {
    /// Wrap `data` in a 200 OK response.
    pub fn ok(data: T) -> Self {
        Self(StatusCode::OK, data)
    }

    /// Wrap `data` in a 201 Created response.
    pub fn created(data: T) -> Self {
        Self(StatusCode::CREATED, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "status": "success", "data": self.1 }))).into_response()
    }
}

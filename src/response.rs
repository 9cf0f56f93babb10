//! The JSON envelope every successful response is wrapped in.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// A successful response body, `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Wrap `data` in the response envelope.
pub fn data<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data })
}

/// Wrap `data` in the response envelope with a 201 status.
pub fn created<T>(data: T) -> (StatusCode, Json<DataResponse<T>>) {
    (StatusCode::CREATED, Json(DataResponse { data }))
}

/// A response body for operations that only report success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Build a [Message] response body.
pub fn message(text: &str) -> Json<Message> {
    Json(Message {
        message: text.to_owned(),
    })
}

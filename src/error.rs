//! The application error type and its conversion into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::category::CategoryId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request field failed validation.
    ///
    /// `field` names the offending input field as it appears in the request
    /// body or query string.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The name of the input field.
        field: &'static str,
        /// A human readable explanation of what is wrong with the field.
        message: String,
    },

    /// The requested resource was not found, or it is not owned by the
    /// requesting user.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request conflicts with existing data, e.g. a duplicate category
    /// name or deleting a category that is still in use.
    #[error("{0}")]
    Conflict(String),

    /// The operation is not allowed in the resource's current state, e.g. a
    /// payment against a debt that has already been paid off.
    #[error("{0}")]
    InvalidState(String),

    /// The category ID does not refer to a category the user may use for
    /// this kind of record.
    #[error("category {0} cannot be used here: {1}")]
    InvalidCategory(CategoryId, String),

    /// The request did not carry a valid user identity.
    #[error("missing or invalid user ID")]
    Unauthenticated,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A total grew beyond what a decimal can represent.
    #[error("an amount is too large to be totalled")]
    AmountOverflow,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl Error {
    /// Shorthand for building an [Error::Validation].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } | Error::InvalidCategory(..) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Conflict(_) | Error::InvalidState(_) => StatusCode::CONFLICT,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::SqlError(_)
            | Error::AmountOverflow
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::Conflict("a category with this name and type already exists".to_owned())
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct FieldError {
    field: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldError>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            Error::Validation { field, message } => ErrorBody {
                error: "Validation failed".to_owned(),
                details: vec![FieldError { field, message }],
            },
            // Internal details are logged but never shown to the client.
            error if status.is_server_error() => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorBody {
                    error: "Internal server error".to_owned(),
                    details: Vec::new(),
                }
            }
            error => ErrorBody {
                error: error.to_string(),
                details: Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

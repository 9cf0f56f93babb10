//! Identifies the user a request is made on behalf of.
//!
//! Authentication happens upstream. A trusted proxy forwards the
//! authenticated user's ID in the [USER_ID_HEADER] header, which this
//! middleware turns into a [UserID] request extension.

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, UserID};

/// The header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware function that checks for a valid user ID header.
///
/// The user ID is placed into the request and the request executed normally
/// if the header is valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(mut request: Request, next: Next) -> Response {
    match get_user_id(request.headers()) {
        Some(user_id) => {
            request.extensions_mut().insert(user_id);
            next.run(request).await
        }
        None => {
            tracing::debug!("Rejected request to {} without a valid user ID", request.uri());
            Error::Unauthenticated.into_response()
        }
    }
}

fn get_user_id(headers: &HeaderMap) -> Option<UserID> {
    headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .map(UserID::new)
}

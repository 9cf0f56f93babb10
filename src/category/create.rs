//! Category creation endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    AppState, Error, UserID,
    category::{Category, CategoryInput, NewCategory},
    response::{DataResponse, created},
    stores::LedgerStore,
};

/// Create a category owned by the requesting user.
///
/// # Errors
///
/// Returns an [Error::Validation] if the name is empty or an
/// [Error::Conflict] if the user already has a category with the same name
/// and type.
pub async fn create_category_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<DataResponse<Category>>), Error>
where
    L: LedgerStore,
{
    let category = NewCategory::try_from(input)?;

    state
        .ledger
        .create_category(user_id, category)
        .inspect(|category| tracing::debug!("User {user_id} created category {}", category.id))
        .map(created)
}

//! Category lookup and editing endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    category::{Category, CategoryId, CategoryName},
    patch::Patch,
    response::{DataResponse, data},
    stores::{CategoryStore, LedgerStore},
};

/// The request body for editing a category.
///
/// The type of a category cannot change once it is created.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Patch<String>,
    #[serde(default)]
    pub color: Patch<String>,
}

/// Apply `update` to a category owned by `user_id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the category is a default or belongs to
/// another user, an [Error::Validation] if the new name is empty, or an
/// [Error::Conflict] if the user already has a category of the same type
/// with the new name.
pub fn edit_category<S>(
    store: &S,
    user_id: UserID,
    category_id: CategoryId,
    update: CategoryUpdate,
) -> Result<Category, Error>
where
    S: CategoryStore,
{
    let mut category = store.get_visible_category(user_id, category_id)?;

    if category.user_id != Some(user_id) {
        return Err(Error::NotFound);
    }

    if let Some(name) = update.name {
        category.name = CategoryName::new(&name)?;
    }
    category.icon = update.icon.apply(category.icon);
    category.color = update.color.apply(category.color);

    store.update_category(&category)?;
    tracing::debug!("User {user_id} edited category {category_id}");

    Ok(category)
}

/// Get a default category or one of the user's own categories.
pub async fn get_category_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<DataResponse<Category>>, Error>
where
    L: LedgerStore,
{
    state
        .ledger
        .get_visible_category(user_id, category_id)
        .map(data)
}

/// Handle edits to a category.
pub async fn update_category_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<CategoryId>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<DataResponse<Category>>, Error>
where
    L: LedgerStore,
{
    edit_category(&state.ledger, user_id, category_id, update).map(data)
}

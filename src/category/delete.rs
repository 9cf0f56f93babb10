//! Category deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error, UserID,
    category::CategoryId,
    response::{Message, message},
    stores::{CategoryStore, LedgerStore},
};

/// Delete a category owned by `user_id` that nothing refers to.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user does not own the category, or an
/// [Error::Conflict] if incomes, expenses or debts still use it.
pub fn delete_category<S>(store: &S, user_id: UserID, category_id: CategoryId) -> Result<(), Error>
where
    S: CategoryStore,
{
    store.delete_category(user_id, category_id).inspect_err(|error| {
        if let Error::Conflict(reason) = error {
            tracing::debug!("Refused to delete category {category_id}: {reason}");
        }
    })
}

/// Handle category deletion.
pub async fn delete_category_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    delete_category(&state.ledger, user_id, category_id)?;

    Ok(message("Category deleted"))
}

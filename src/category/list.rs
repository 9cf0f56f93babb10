//! Category listing endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    category::{Category, CategoryType},
    response::{DataResponse, data},
    stores::LedgerStore,
};

/// Query parameters for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
}

/// List the shared default categories and the user's own categories.
pub async fn list_categories_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<DataResponse<Vec<Category>>>, Error>
where
    L: LedgerStore,
{
    state
        .ledger
        .get_visible_categories(user_id, filter.category_type)
        .map(data)
}

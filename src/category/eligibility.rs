//! Checks that a category may be attached to a record.

use crate::{
    Error, UserID,
    category::{Category, CategoryId, CategoryType},
    stores::CategoryStore,
};

/// Category types an expense may use.
pub const EXPENSE_CATEGORY_TYPES: &[CategoryType] = &[CategoryType::Fixed, CategoryType::Variable];
/// Category types an income may use.
pub const INCOME_CATEGORY_TYPES: &[CategoryType] = &[CategoryType::Income];
/// Category types a debt may use.
pub const DEBT_CATEGORY_TYPES: &[CategoryType] = &[CategoryType::Debt];

/// Get the category `category_id` if `user_id` can see it and its type is
/// one of `allowed`.
///
/// # Errors
///
/// Returns an [Error::InvalidCategory] if the category does not exist, is
/// owned by another user or has the wrong type.
pub fn check_category<S>(
    store: &S,
    user_id: UserID,
    category_id: CategoryId,
    allowed: &[CategoryType],
) -> Result<Category, Error>
where
    S: CategoryStore,
{
    let category = match store.get_visible_category(user_id, category_id) {
        Ok(category) => category,
        Err(Error::NotFound) => {
            return Err(Error::InvalidCategory(
                category_id,
                "the category does not exist".to_owned(),
            ));
        }
        Err(error) => return Err(error),
    };

    if !allowed.contains(&category.category_type) {
        let allowed = allowed
            .iter()
            .map(CategoryType::as_str)
            .collect::<Vec<_>>()
            .join(" or ");

        return Err(Error::InvalidCategory(
            category_id,
            format!("expected a {allowed} category, got {}", category.category_type),
        ));
    }

    Ok(category)
}

//! Defines the category store trait.

use crate::{
    Error, UserID,
    category::{Category, CategoryId, CategoryType, NewCategory},
};

/// Creates, retrieves, edits and deletes categories.
///
/// A category is visible to a user if it is one of the shared defaults or if
/// the user owns it.
pub trait CategoryStore {
    /// Create a new category owned by `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::Conflict] if the user already has a category with the
    /// same name and type.
    fn create_category(&self, user_id: UserID, category: NewCategory) -> Result<Category, Error>;

    /// Get a category that is visible to `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the category does not exist or is owned
    /// by someone else.
    fn get_visible_category(
        &self,
        user_id: UserID,
        category_id: CategoryId,
    ) -> Result<Category, Error>;

    /// Get the categories visible to `user_id`, optionally only those of
    /// `category_type`, ordered by name.
    fn get_visible_categories(
        &self,
        user_id: UserID,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, Error>;

    /// Get the categories with the given IDs. IDs that do not exist are
    /// skipped.
    fn get_categories_by_ids(&self, category_ids: &[CategoryId]) -> Result<Vec<Category>, Error>;

    /// Overwrite the name, icon and color of a category owned by its user.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if `category` is a default or is not owned
    /// by its `user_id`, or an [Error::Conflict] if the new name is taken.
    fn update_category(&self, category: &Category) -> Result<(), Error>;

    /// Delete a category owned by `user_id` that no income, expense or debt
    /// refers to.
    ///
    /// Checking for references and deleting happen atomically.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the user does not own the category, or
    /// an [Error::Conflict] if records still refer to it.
    fn delete_category(&self, user_id: UserID, category_id: CategoryId) -> Result<(), Error>;
}

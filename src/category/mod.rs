//! Categories for grouping incomes, expenses and debts.

mod create;
mod delete;
mod domain;
mod edit;
mod eligibility;
mod list;

pub use create::create_category_endpoint;
pub use delete::{delete_category, delete_category_endpoint};
pub use domain::{Category, CategoryId, CategoryInput, CategoryName, CategoryType, NewCategory};
pub use edit::{CategoryUpdate, edit_category, get_category_endpoint, update_category_endpoint};
pub use eligibility::{
    DEBT_CATEGORY_TYPES, EXPENSE_CATEGORY_TYPES, INCOME_CATEGORY_TYPES, check_category,
};
pub use list::{CategoryFilter, list_categories_endpoint};

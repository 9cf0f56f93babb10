//! Defines the income and expense store trait.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error, UserID,
    category::{CategoryId, CategoryType},
    transaction::{Expense, Income, NewExpense, NewIncome, TransactionId, TransactionKind},
};

/// Handles the creation and retrieval of incomes and expenses.
///
/// Every method is scoped to a single user. Records owned by other users
/// behave as if they do not exist.
pub trait TransactionStore {
    /// Create a new income in the store.
    fn create_income(&self, user_id: UserID, income: NewIncome) -> Result<Income, Error>;

    /// Create a new expense in the store.
    fn create_expense(&self, user_id: UserID, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve an income owned by `user_id`.
    fn get_income(&self, user_id: UserID, id: TransactionId) -> Result<Income, Error>;

    /// Retrieve an expense owned by `user_id`.
    fn get_expense(&self, user_id: UserID, id: TransactionId) -> Result<Expense, Error>;

    /// Overwrite a stored income with `income`.
    fn update_income(&self, income: &Income) -> Result<(), Error>;

    /// Overwrite a stored expense with `expense`.
    fn update_expense(&self, expense: &Expense) -> Result<(), Error>;

    /// Delete an income or expense owned by `user_id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no such record is owned by the user.
    fn delete_transaction(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        id: TransactionId,
    ) -> Result<(), Error>;

    /// Retrieve incomes in the way defined by `query`.
    fn get_incomes(&self, user_id: UserID, query: &TransactionQuery) -> Result<Vec<Income>, Error>;

    /// Retrieve expenses in the way defined by `query`.
    fn get_expenses(
        &self,
        user_id: UserID,
        query: &TransactionQuery,
    ) -> Result<Vec<Expense>, Error>;

    /// Sum the amounts of the records of `kind` that match `filter`.
    fn sum_transactions(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<AmountTotal, Error>;

    /// Sum the amounts of the records of `kind` that match `filter`, grouped
    /// by category.
    ///
    /// Uncategorised records are grouped under `None`. Groups are returned in
    /// ascending order of category ID with `None` first.
    fn sum_transactions_by_category(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryTotal>, Error>;

    /// Sum the amounts of the incomes that match `filter`, grouped by source.
    ///
    /// Incomes without a source are grouped under `None`. Groups are returned
    /// in ascending order of source with `None` first.
    fn sum_incomes_by_source(
        &self,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<SourceTotal>, Error>;
}

/// Defines how records should be fetched from a [TransactionStore].
///
/// Records are always returned newest first, with ties broken by descending
/// ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Which records to include.
    pub filter: TransactionFilter,
    /// Selects up to the first N (`limit`) records.
    pub limit: Option<u64>,
    /// Skip the first N records.
    pub offset: u64,
}

/// Restricts which records are listed or included in a sum.
///
/// Every condition that is set must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Include records within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Include only records in this category.
    pub category_id: Option<CategoryId>,
    /// Include only records whose category has this type.
    pub category_type: Option<CategoryType>,
    /// Include only incomes whose source contains this text. Expenses have no
    /// source and ignore it.
    pub source: Option<String>,
}

impl TransactionFilter {
    /// A filter on `date_range` alone.
    pub fn in_range(date_range: RangeInclusive<Date>) -> Self {
        Self {
            date_range: Some(date_range),
            ..Default::default()
        }
    }
}

/// The sum and number of a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountTotal {
    pub total: Decimal,
    pub count: u64,
}

/// The sum and number of the incomes from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTotal {
    pub source: Option<String>,
    pub total: Decimal,
    pub count: u64,
}

/// The sum and number of the records in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category_id: Option<CategoryId>,
    pub total: Decimal,
    pub count: u64,
}

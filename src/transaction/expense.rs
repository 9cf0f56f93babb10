//! Expense operations and their endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error, UserID,
    analytics::{CategoryBreakdown, join_categories},
    category::{CategoryType, EXPENSE_CATEGORY_TYPES, check_category},
    money::require_positive,
    pagination::{ListQuery, PageInfo, PageResponse, date_range},
    response::{DataResponse, Message, created, data, message},
    stores::{
        AmountTotal, CategoryStore, LedgerStore, TransactionFilter, TransactionQuery, TransactionStore,
    },
    transaction::{
        Expense, ExpenseInput, ExpenseUpdate, NewExpense, TransactionId, TransactionKind,
        validate_description,
    },
};

/// Validate and store a new expense.
///
/// # Errors
///
/// Returns an [Error::Validation] for a non-positive amount or empty
/// description, or an [Error::InvalidCategory] if the category is not a
/// fixed or variable category visible to the user.
pub fn create_expense<S>(store: &S, user_id: UserID, input: ExpenseInput) -> Result<Expense, Error>
where
    S: CategoryStore + TransactionStore,
{
    let amount = require_positive("amount", input.amount)?;
    let description = validate_description(&input.description)?;
    check_category(store, user_id, input.category_id, EXPENSE_CATEGORY_TYPES)?;

    store.create_expense(
        user_id,
        NewExpense {
            amount,
            description,
            date: input.date,
            is_recurring: input.is_recurring,
            category_id: input.category_id,
        },
    )
}

/// Apply `update` to an expense owned by `user_id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user does not own the expense, and the
/// same validation errors as [create_expense].
pub fn update_expense<S>(
    store: &S,
    user_id: UserID,
    id: TransactionId,
    update: ExpenseUpdate,
) -> Result<Expense, Error>
where
    S: CategoryStore + TransactionStore,
{
    let mut expense = store.get_expense(user_id, id)?;

    if let Some(amount) = update.amount {
        expense.amount = require_positive("amount", amount)?;
    }

    if let Some(description) = update.description {
        expense.description = validate_description(&description)?;
    }

    if let Some(category_id) = update.category_id {
        check_category(store, user_id, category_id, EXPENSE_CATEGORY_TYPES)?;
        expense.category_id = category_id;
    }

    expense.date = update.date.unwrap_or(expense.date);
    expense.is_recurring = update.is_recurring.unwrap_or(expense.is_recurring);

    store.update_expense(&expense)?;

    Ok(expense)
}

/// Get one page of a user's expenses, newest first.
pub fn list_expenses<S>(
    store: &S,
    user_id: UserID,
    query: &ListQuery,
) -> Result<PageResponse<Expense>, Error>
where
    S: TransactionStore,
{
    let (page, limit) = query.page_and_limit()?;
    let filter = query.filter();

    let total = store
        .sum_transactions(TransactionKind::Expense, user_id, &filter)?
        .count;
    let expenses = store.get_expenses(
        user_id,
        &TransactionQuery {
            filter,
            limit: Some(limit),
            offset: (page - 1) * limit,
        },
    )?;

    Ok(PageResponse {
        data: expenses,
        pagination: PageInfo::new(page, limit, total),
    })
}

/// A total and the number of records it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subtotal {
    pub total: Decimal,
    pub count: u64,
}

impl From<AmountTotal> for Subtotal {
    fn from(value: AmountTotal) -> Self {
        Self {
            total: value.total,
            count: value.count,
        }
    }
}

/// Expense totals split by fixed and variable categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: u64,
    pub fixed: Subtotal,
    pub variable: Subtotal,
}

/// Query parameters for income and expense summaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl SummaryQuery {
    /// Records within the requested dates.
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            date_range: date_range(self.start_date, self.end_date),
            ..Default::default()
        }
    }
}

/// Sum a user's expenses, optionally within a date range.
pub fn summarize_expenses<S>(
    store: &S,
    user_id: UserID,
    query: &SummaryQuery,
) -> Result<ExpenseSummary, Error>
where
    S: TransactionStore,
{
    let filter = query.filter();

    let sum = |category_type| {
        store.sum_transactions(
            TransactionKind::Expense,
            user_id,
            &TransactionFilter {
                category_type,
                ..filter.clone()
            },
        )
    };

    let all = sum(None)?;
    let fixed = sum(Some(CategoryType::Fixed))?;
    let variable = sum(Some(CategoryType::Variable))?;

    Ok(ExpenseSummary {
        total: all.total,
        count: all.count,
        fixed: fixed.into(),
        variable: variable.into(),
    })
}

/// Total a user's expenses per category, largest first.
pub fn expenses_by_category<S>(
    store: &S,
    user_id: UserID,
    query: &SummaryQuery,
) -> Result<Vec<CategoryBreakdown>, Error>
where
    S: CategoryStore + TransactionStore,
{
    let groups =
        store.sum_transactions_by_category(TransactionKind::Expense, user_id, &query.filter())?;

    join_categories(store, groups)
}

pub async fn list_expenses_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<Expense>>, Error>
where
    L: LedgerStore,
{
    list_expenses(&state.ledger, user_id, &query).map(Json)
}

pub async fn get_expense_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<TransactionId>,
) -> Result<Json<DataResponse<Expense>>, Error>
where
    L: LedgerStore,
{
    state.ledger.get_expense(user_id, expense_id).map(data)
}

pub async fn create_expense_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Json(input): Json<ExpenseInput>,
) -> Result<(StatusCode, Json<DataResponse<Expense>>), Error>
where
    L: LedgerStore,
{
    create_expense(&state.ledger, user_id, input).map(created)
}

pub async fn update_expense_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<TransactionId>,
    Json(update): Json<ExpenseUpdate>,
) -> Result<Json<DataResponse<Expense>>, Error>
where
    L: LedgerStore,
{
    update_expense(&state.ledger, user_id, expense_id, update).map(data)
}

pub async fn delete_expense_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<TransactionId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    state
        .ledger
        .delete_transaction(TransactionKind::Expense, user_id, expense_id)?;

    Ok(message("Expense deleted"))
}

/// Get expense totals split by fixed and variable categories.
pub async fn expense_summary_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<DataResponse<ExpenseSummary>>, Error>
where
    L: LedgerStore,
{
    summarize_expenses(&state.ledger, user_id, &query).map(data)
}

/// Get expense totals per category.
pub async fn expenses_by_category_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<DataResponse<Vec<CategoryBreakdown>>>, Error>
where
    L: LedgerStore,
{
    expenses_by_category(&state.ledger, user_id, &query).map(data)
}

//! Income operations and their endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    AppState, Error, UserID,
    analytics::{CategoryBreakdown, join_categories},
    category::{INCOME_CATEGORY_TYPES, check_category},
    money::require_positive,
    pagination::{ListQuery, PageInfo, PageResponse},
    response::{DataResponse, Message, created, data, message},
    stores::{CategoryStore, LedgerStore, SourceTotal, TransactionQuery, TransactionStore},
    transaction::{
        Income, IncomeInput, IncomeUpdate, NewIncome, SummaryQuery, TransactionId,
        TransactionKind, validate_description,
    },
};

/// Validate and store a new income.
///
/// # Errors
///
/// Returns an [Error::Validation] for a non-positive amount or empty
/// description, or an [Error::InvalidCategory] if the category is not an
/// income category visible to the user.
pub fn create_income<S>(store: &S, user_id: UserID, input: IncomeInput) -> Result<Income, Error>
where
    S: CategoryStore + TransactionStore,
{
    let amount = require_positive("amount", input.amount)?;
    let description = validate_description(&input.description)?;

    if let Some(category_id) = input.category_id {
        check_category(store, user_id, category_id, INCOME_CATEGORY_TYPES)?;
    }

    store.create_income(
        user_id,
        NewIncome {
            amount,
            description,
            source: input.source,
            date: input.date,
            is_recurring: input.is_recurring,
            category_id: input.category_id,
        },
    )
}

/// Apply `update` to an income owned by `user_id`.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user does not own the income, and the
/// same validation errors as [create_income].
pub fn update_income<S>(
    store: &S,
    user_id: UserID,
    id: TransactionId,
    update: IncomeUpdate,
) -> Result<Income, Error>
where
    S: CategoryStore + TransactionStore,
{
    let mut income = store.get_income(user_id, id)?;

    if let Some(amount) = update.amount {
        income.amount = require_positive("amount", amount)?;
    }

    if let Some(description) = update.description {
        income.description = validate_description(&description)?;
    }

    if let Some(category_id) = update.category_id.as_set() {
        check_category(store, user_id, *category_id, INCOME_CATEGORY_TYPES)?;
    }

    income.source = update.source.apply(income.source);
    income.category_id = update.category_id.apply(income.category_id);
    income.date = update.date.unwrap_or(income.date);
    income.is_recurring = update.is_recurring.unwrap_or(income.is_recurring);

    store.update_income(&income)?;

    Ok(income)
}

/// Get one page of a user's incomes, newest first.
pub fn list_incomes<S>(
    store: &S,
    user_id: UserID,
    query: &ListQuery,
) -> Result<PageResponse<Income>, Error>
where
    S: TransactionStore,
{
    let (page, limit) = query.page_and_limit()?;
    let filter = query.filter();

    let total = store
        .sum_transactions(TransactionKind::Income, user_id, &filter)?
        .count;
    let incomes = store.get_incomes(
        user_id,
        &TransactionQuery {
            filter,
            limit: Some(limit),
            offset: (page - 1) * limit,
        },
    )?;

    Ok(PageResponse {
        data: incomes,
        pagination: PageInfo::new(page, limit, total),
    })
}

/// Income totals overall, per source and per category.
///
/// Incomes without a source are grouped under a `null` source, and incomes
/// without a category under a `null` category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub total: Decimal,
    pub count: u64,
    pub by_source: Vec<SourceTotal>,
    pub by_category: Vec<CategoryBreakdown>,
}

/// Sum a user's incomes, optionally within a date range.
///
/// Both groupings are ordered by total, largest first.
pub fn summarize_incomes<S>(
    store: &S,
    user_id: UserID,
    query: &SummaryQuery,
) -> Result<IncomeSummary, Error>
where
    S: CategoryStore + TransactionStore,
{
    let filter = query.filter();

    let all = store.sum_transactions(TransactionKind::Income, user_id, &filter)?;

    let mut by_source = store.sum_incomes_by_source(user_id, &filter)?;
    by_source.sort_by(|a, b| b.total.cmp(&a.total));

    let groups = store.sum_transactions_by_category(TransactionKind::Income, user_id, &filter)?;
    let by_category = join_categories(store, groups)?;

    Ok(IncomeSummary {
        total: all.total,
        count: all.count,
        by_source,
        by_category,
    })
}

pub async fn list_incomes_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PageResponse<Income>>, Error>
where
    L: LedgerStore,
{
    list_incomes(&state.ledger, user_id, &query).map(Json)
}

pub async fn get_income_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(income_id): Path<TransactionId>,
) -> Result<Json<DataResponse<Income>>, Error>
where
    L: LedgerStore,
{
    state.ledger.get_income(user_id, income_id).map(data)
}

pub async fn create_income_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Json(input): Json<IncomeInput>,
) -> Result<(StatusCode, Json<DataResponse<Income>>), Error>
where
    L: LedgerStore,
{
    create_income(&state.ledger, user_id, input).map(created)
}

pub async fn update_income_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(income_id): Path<TransactionId>,
    Json(update): Json<IncomeUpdate>,
) -> Result<Json<DataResponse<Income>>, Error>
where
    L: LedgerStore,
{
    update_income(&state.ledger, user_id, income_id, update).map(data)
}

pub async fn delete_income_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(income_id): Path<TransactionId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    state
        .ledger
        .delete_transaction(TransactionKind::Income, user_id, income_id)?;

    Ok(message("Income deleted"))
}

/// Get income totals per source and per category.
pub async fn income_summary_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<DataResponse<IncomeSummary>>, Error>
where
    L: LedgerStore,
{
    summarize_incomes(&state.ledger, user_id, &query).map(data)
}

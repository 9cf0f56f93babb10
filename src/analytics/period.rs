//! Totals of incomes and expenses over a closed date interval.

use std::{collections::HashMap, ops::RangeInclusive};

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error, UserID,
    analytics::CalendarMonth,
    category::{Category, CategoryId},
    stores::{AmountTotal, CategoryStore, CategoryTotal, TransactionFilter, TransactionStore},
    transaction::TransactionKind,
};

/// The total of one category's records within a period.
///
/// `category_id` is `None` for records without a category. A record whose
/// category has since been deleted keeps its `category_id` but has no
/// `category`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: Option<CategoryId>,
    pub category: Option<Category>,
    pub total: Decimal,
    pub count: u64,
}

/// The totals of one kind of record within a period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindTotals {
    pub total: Decimal,
    pub count: u64,
    pub by_category: Vec<CategoryBreakdown>,
}

/// Income and expense totals within a period.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub income: KindTotals,
    pub expenses: KindTotals,
    pub balance: Decimal,
}

/// The calendar month a [MonthlyReport] covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u8,
    pub start: Date,
    pub end: Date,
}

/// The totals for a single calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub period: ReportPeriod,
    #[serde(flatten)]
    pub totals: PeriodTotals,
}

/// Sum the records of `kind` owned by `user_id` within `date_range`.
///
/// An inverted range (start after end) has no records.
pub fn sum_period<S>(
    store: &S,
    user_id: UserID,
    kind: TransactionKind,
    date_range: &RangeInclusive<Date>,
) -> Result<AmountTotal, Error>
where
    S: TransactionStore,
{
    if date_range.is_empty() {
        return Ok(AmountTotal::default());
    }

    store.sum_transactions(kind, user_id, &TransactionFilter::in_range(date_range.clone()))
}

/// Group the records of `kind` within `date_range` by category, largest total
/// first.
///
/// Only categories with at least one record appear.
pub fn breakdown_by_category<S>(
    store: &S,
    user_id: UserID,
    kind: TransactionKind,
    date_range: &RangeInclusive<Date>,
) -> Result<Vec<CategoryBreakdown>, Error>
where
    S: TransactionStore + CategoryStore,
{
    if date_range.is_empty() {
        return Ok(Vec::new());
    }

    join_categories(
        store,
        store.sum_transactions_by_category(
            kind,
            user_id,
            &TransactionFilter::in_range(date_range.clone()),
        )?,
    )
}

/// Attach category metadata to `groups` and sort them largest total first.
pub fn join_categories<S>(
    store: &S,
    groups: Vec<CategoryTotal>,
) -> Result<Vec<CategoryBreakdown>, Error>
where
    S: CategoryStore,
{
    let category_ids: Vec<CategoryId> = groups
        .iter()
        .filter_map(|group| group.category_id)
        .collect();
    let mut categories: HashMap<CategoryId, Category> = store
        .get_categories_by_ids(&category_ids)?
        .into_iter()
        .map(|category| (category.id, category))
        .collect();

    let mut breakdown: Vec<CategoryBreakdown> = groups
        .into_iter()
        .map(|group| CategoryBreakdown {
            category_id: group.category_id,
            category: group
                .category_id
                .and_then(|category_id| categories.remove(&category_id)),
            total: group.total,
            count: group.count,
        })
        .collect();

    breakdown.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(breakdown)
}

fn kind_totals<S>(
    store: &S,
    user_id: UserID,
    kind: TransactionKind,
    date_range: &RangeInclusive<Date>,
) -> Result<KindTotals, Error>
where
    S: TransactionStore + CategoryStore,
{
    let AmountTotal { total, count } = sum_period(store, user_id, kind, date_range)?;
    let by_category = breakdown_by_category(store, user_id, kind, date_range)?;

    Ok(KindTotals {
        total,
        count,
        by_category,
    })
}

/// Compute income, expense and per-category totals for the records owned by
/// `user_id` dated within `date_range` (inclusive).
///
/// Empty periods produce zero totals rather than an error.
pub fn aggregate_period<S>(
    store: &S,
    user_id: UserID,
    date_range: &RangeInclusive<Date>,
) -> Result<PeriodTotals, Error>
where
    S: TransactionStore + CategoryStore,
{
    let income = kind_totals(store, user_id, TransactionKind::Income, date_range)?;
    let expenses = kind_totals(store, user_id, TransactionKind::Expense, date_range)?;
    let balance = income.total - expenses.total;

    Ok(PeriodTotals {
        income,
        expenses,
        balance,
    })
}

pub fn monthly_report<S>(
    store: &S,
    user_id: UserID,
    month: CalendarMonth,
) -> Result<MonthlyReport, Error>
where
    S: TransactionStore + CategoryStore,
{
    let totals = aggregate_period(store, user_id, &month.date_range())?;

    Ok(MonthlyReport {
        period: ReportPeriod {
            year: month.year(),
            month: month.month().into(),
            start: month.first_day(),
            end: month.last_day(),
        },
        totals,
    })
}

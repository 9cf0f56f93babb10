//! Composes the current month overview shown on the dashboard.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error, UserID,
    analytics::{
        CalendarMonth,
        period::{CategoryBreakdown, breakdown_by_category, sum_period},
    },
    category::CategoryId,
    money::sum_amounts,
    stores::{CategoryStore, DebtStore, TransactionQuery, TransactionStore},
    transaction::{Expense, Income, TransactionId, TransactionKind},
};

/// The most transactions listed under recent transactions.
pub const RECENT_TRANSACTION_LIMIT: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    /// The remaining amount over all debts.
    pub total_debt: Decimal,
    /// The number of debts that are not paid off yet.
    pub active_debts: u64,
}

/// An income or an expense in the merged recent transactions list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: Date,
    pub category_id: Option<CategoryId>,
}

impl From<Income> for RecentTransaction {
    fn from(income: Income) -> Self {
        Self {
            id: income.id,
            kind: TransactionKind::Income,
            amount: income.amount,
            description: income.description,
            date: income.date,
            category_id: income.category_id,
        }
    }
}

impl From<Expense> for RecentTransaction {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            kind: TransactionKind::Expense,
            amount: expense.amount,
            description: expense.description,
            date: expense.date,
            category_id: Some(expense.category_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPeriod {
    pub start: Date,
    pub end: Date,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub expenses_by_category: Vec<CategoryBreakdown>,
    pub recent_transactions: Vec<RecentTransaction>,
    pub period: DashboardPeriod,
}

/// Build the dashboard for the month containing `today`.
pub fn compose_dashboard<S>(store: &S, user_id: UserID, today: Date) -> Result<Dashboard, Error>
where
    S: TransactionStore + CategoryStore + DebtStore,
{
    let month = CalendarMonth::containing(today);
    let date_range = month.date_range();

    let income = sum_period(store, user_id, TransactionKind::Income, &date_range)?.total;
    let expenses = sum_period(store, user_id, TransactionKind::Expense, &date_range)?.total;
    let expenses_by_category =
        breakdown_by_category(store, user_id, TransactionKind::Expense, &date_range)?;

    let debts = store.get_debts(user_id, None)?;
    let total_debt = sum_amounts(debts.iter().map(|debt| &debt.remaining_amount))?;
    let active_debts = debts.iter().filter(|debt| !debt.is_settled()).count() as u64;

    Ok(Dashboard {
        summary: DashboardSummary {
            income,
            expenses,
            balance: income - expenses,
            total_debt,
            active_debts,
        },
        expenses_by_category,
        recent_transactions: recent_transactions(store, user_id)?,
        period: DashboardPeriod {
            start: month.first_day(),
            end: month.last_day(),
        },
    })
}

/// The latest incomes and expenses merged into one list, newest first.
pub fn recent_transactions<S>(store: &S, user_id: UserID) -> Result<Vec<RecentTransaction>, Error>
where
    S: TransactionStore,
{
    let query = TransactionQuery {
        limit: Some(RECENT_TRANSACTION_LIMIT),
        ..Default::default()
    };

    let mut recent: Vec<RecentTransaction> = store
        .get_incomes(user_id, &query)?
        .into_iter()
        .map(RecentTransaction::from)
        .chain(
            store
                .get_expenses(user_id, &query)?
                .into_iter()
                .map(RecentTransaction::from),
        )
        .collect();

    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    recent.truncate(RECENT_TRANSACTION_LIMIT as usize);

    Ok(recent)
}

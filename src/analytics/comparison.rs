//! Month by month totals over a trailing window of calendar months.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error, UserID,
    analytics::{CalendarMonth, MonthLabels, period::sum_period},
    stores::TransactionStore,
    transaction::TransactionKind,
};

/// The most months a comparison may span.
pub const MAX_COMPARISON_MONTHS: u32 = 120;

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub year: i32,
    pub month: u8,
    pub month_name: &'static str,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Totals for the `months` calendar months ending with `current`, oldest
/// first.
///
/// # Errors
///
/// Returns an [Error::Validation] if `months` is zero or more than
/// [MAX_COMPARISON_MONTHS].
pub fn build_comparison<S>(
    store: &S,
    user_id: UserID,
    current: CalendarMonth,
    months: u32,
    labels: MonthLabels,
) -> Result<Vec<MonthlyComparison>, Error>
where
    S: TransactionStore,
{
    if !(1..=MAX_COMPARISON_MONTHS).contains(&months) {
        return Err(Error::validation(
            "months",
            format!("must be between 1 and {MAX_COMPARISON_MONTHS}"),
        ));
    }

    let mut comparison = Vec::with_capacity(months as usize);
    let mut month = Some(current);

    for _ in 0..months {
        let Some(calendar_month) = month else {
            return Err(Error::validation("months", "reaches before the earliest date"));
        };

        let date_range = calendar_month.date_range();
        let income = sum_period(store, user_id, TransactionKind::Income, &date_range)?.total;
        let expenses = sum_period(store, user_id, TransactionKind::Expense, &date_range)?.total;

        comparison.push(MonthlyComparison {
            year: calendar_month.year(),
            month: calendar_month.month().into(),
            month_name: labels.label(calendar_month.month()),
            income,
            expenses,
            balance: income - expenses,
        });

        month = calendar_month.previous();
    }

    comparison.reverse();

    Ok(comparison)
}

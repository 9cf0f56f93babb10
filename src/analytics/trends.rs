//! Averages and trend directions derived from a month by month comparison.
//!
//! The trend is a heuristic rather than a forecast: it compares the mean of the
//! latest [TREND_WINDOW] months with the mean of the [TREND_WINDOW] months
//! before them. When there is not enough history for the earlier window, or
//! that window averages to zero, the latest window stands in for it. This
//! reports a 0% change and is flagged with `fallback`.
//!
//! A change too large to represent is an [Error::AmountOverflow].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error,
    analytics::MonthlyComparison,
    money::{round_money, sum_amounts},
};

/// The number of months in each of the two windows that are compared.
pub const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// How a series changed between the earlier and the latest window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// The change as a percentage of the earlier window's mean.
    pub percentage: Decimal,
    /// Set when the earlier window could not be used.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Averages {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trends {
    pub income: Trend,
    pub expenses: Trend,
}

/// The comparison data with its averages and trends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub data: Vec<MonthlyComparison>,
    pub averages: Averages,
    pub trends: Trends,
    /// Whether there are fewer than two full windows of months.
    pub insufficient_history: bool,
}

fn mean(values: &[Decimal]) -> Result<Decimal, Error> {
    if values.is_empty() {
        return Ok(Decimal::ZERO);
    }

    sum_amounts(values)?
        .checked_div(Decimal::from(values.len()))
        .ok_or(Error::AmountOverflow)
}

/// `recent` as a percentage change from `previous`, rounded to cents.
fn percentage_change(previous: Decimal, recent: Decimal) -> Result<Decimal, Error> {
    recent
        .checked_sub(previous)
        .and_then(|change| change.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or(Error::AmountOverflow)
}

/// Compute the trend of `series`, which is ordered oldest first.
///
/// # Errors
///
/// Returns an [Error::AmountOverflow] if a window's sum or the percentage
/// change does not fit in a [Decimal].
pub fn compute_trend(series: &[Decimal]) -> Result<Trend, Error> {
    let len = series.len();
    let recent = mean(&series[len.saturating_sub(TREND_WINDOW)..])?;

    let previous = if len >= 2 * TREND_WINDOW {
        Some(mean(&series[len - 2 * TREND_WINDOW..len - TREND_WINDOW])?)
    } else {
        None
    };

    let (previous, fallback) = match previous {
        Some(previous) if !previous.is_zero() => (previous, false),
        _ => (recent, true),
    };

    let percentage = if previous > Decimal::ZERO {
        percentage_change(previous, recent)?
    } else {
        Decimal::ZERO
    };

    let direction = if recent >= previous {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    Ok(Trend {
        direction,
        percentage,
        fallback,
    })
}

/// Derive averages and trends from `data`, a comparison ordered oldest first.
pub fn analyze_trends(data: Vec<MonthlyComparison>) -> Result<TrendReport, Error> {
    let income: Vec<Decimal> = data.iter().map(|month| month.income).collect();
    let expenses: Vec<Decimal> = data.iter().map(|month| month.expenses).collect();
    let balance: Vec<Decimal> = data.iter().map(|month| month.balance).collect();

    let averages = Averages {
        income: round_money(mean(&income)?),
        expenses: round_money(mean(&expenses)?),
        balance: round_money(mean(&balance)?),
    };

    let trends = Trends {
        income: compute_trend(&income)?,
        expenses: compute_trend(&expenses)?,
    };

    Ok(TrendReport {
        insufficient_history: data.len() < 2 * TREND_WINDOW,
        data,
        averages,
        trends,
    })
}

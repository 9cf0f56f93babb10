//! HTTP endpoints for the analytics views.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error, UserID,
    analytics::{
        CalendarMonth, Dashboard, MonthlyComparison, MonthlyReport, TrendReport, analyze_trends,
        build_comparison, compose_dashboard, monthly_report,
    },
    app_state::AnalyticsState,
    response::{DataResponse, data},
    stores::LedgerStore,
    timezone::today_in,
};

/// The number of months a comparison covers unless the request says otherwise.
pub const DEFAULT_COMPARISON_MONTHS: u32 = 6;

/// The number of months trends are computed over unless the request says otherwise.
pub const DEFAULT_TREND_MONTHS: u32 = 12;

/// Selects the month for the monthly report. Missing parts default to today's.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthsQuery {
    pub months: Option<u32>,
}

pub async fn dashboard_endpoint<L>(
    State(state): State<AnalyticsState<L>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DataResponse<Dashboard>>, Error>
where
    L: LedgerStore,
{
    let today = today_in(&state.local_timezone)?;

    compose_dashboard(&state.ledger, user_id, today).map(data)
}

pub async fn monthly_endpoint<L>(
    State(state): State<AnalyticsState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<DataResponse<MonthlyReport>>, Error>
where
    L: LedgerStore,
{
    let today = today_in(&state.local_timezone)?;
    let month = CalendarMonth::new(
        query.year.unwrap_or(today.year()),
        query.month.unwrap_or(today.month().into()),
    )?;

    monthly_report(&state.ledger, user_id, month).map(data)
}

pub async fn comparison_endpoint<L>(
    State(state): State<AnalyticsState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<DataResponse<Vec<MonthlyComparison>>>, Error>
where
    L: LedgerStore,
{
    let today = today_in(&state.local_timezone)?;

    build_comparison(
        &state.ledger,
        user_id,
        CalendarMonth::containing(today),
        query.months.unwrap_or(DEFAULT_COMPARISON_MONTHS),
        state.month_labels,
    )
    .map(data)
}

pub async fn trends_endpoint<L>(
    State(state): State<AnalyticsState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<MonthsQuery>,
) -> Result<Json<DataResponse<TrendReport>>, Error>
where
    L: LedgerStore,
{
    let today = today_in(&state.local_timezone)?;

    let comparison = build_comparison(
        &state.ledger,
        user_id,
        CalendarMonth::containing(today),
        query.months.unwrap_or(DEFAULT_TREND_MONTHS),
        state.month_labels,
    )?;

    analyze_trends(comparison).map(data)
}

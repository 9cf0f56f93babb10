//! The analytics engine: period totals, month by month comparisons, trends and
//! the dashboard overview.
//!
//! Every computation only reads from the ledger, so empty data yields zero
//! totals rather than errors.

mod comparison;
mod dashboard;
mod handlers;
mod month;
mod period;
mod trends;

pub use comparison::{MAX_COMPARISON_MONTHS, MonthlyComparison, build_comparison};
pub use dashboard::{
    Dashboard, DashboardPeriod, DashboardSummary, RECENT_TRANSACTION_LIMIT, RecentTransaction,
    compose_dashboard, recent_transactions,
};
pub use handlers::{
    DEFAULT_COMPARISON_MONTHS, DEFAULT_TREND_MONTHS, MonthlyQuery, MonthsQuery,
    comparison_endpoint, dashboard_endpoint, monthly_endpoint, trends_endpoint,
};
pub use month::{CalendarMonth, MonthLabels};
pub use period::{
    CategoryBreakdown, KindTotals, MonthlyReport, PeriodTotals, ReportPeriod, aggregate_period,
    breakdown_by_category, join_categories, monthly_report, sum_period,
};
pub use trends::{
    Averages, TREND_WINDOW, Trend, TrendDirection, TrendReport, Trends, analyze_trends,
    compute_trend,
};

//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{analytics::MonthLabels, stores::LedgerStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<L> {
    /// The store for every kind of ledger record.
    pub ledger: L,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The language month names are reported in.
    pub month_labels: MonthLabels,
}

impl<L> AppState<L> {
    /// Create a new [AppState] around an initialized `ledger`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(ledger: L, local_timezone: &str, month_labels: MonthLabels) -> Self {
        Self {
            ledger,
            local_timezone: local_timezone.to_owned(),
            month_labels,
        }
    }
}

/// The state needed by the analytics endpoints.
#[derive(Debug, Clone)]
pub struct AnalyticsState<L> {
    pub ledger: L,
    pub local_timezone: String,
    pub month_labels: MonthLabels,
}

impl<L> FromRef<AppState<L>> for AnalyticsState<L>
where
    L: LedgerStore,
{
    fn from_ref(state: &AppState<L>) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
            month_labels: state.month_labels,
        }
    }
}

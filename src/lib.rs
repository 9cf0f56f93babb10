//! A household finance ledger.
//!
//! Users record incomes, expenses, debts and savings goals, grouped by
//! categories, and view analytics over them: the current month's dashboard,
//! monthly totals, month by month comparisons and trends.
//!
//! This library provides a JSON REST API. Authentication happens upstream and
//! the authenticated user is passed to the API in the `X-User-Id` header.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

#[allow(missing_docs)]
pub mod analytics;
mod app_state;
mod auth;
#[allow(missing_docs)]
pub mod category;
mod db;
#[allow(missing_docs)]
pub mod debt;
pub mod endpoints;
mod error;
mod logging;
mod money;
mod pagination;
mod patch;
mod response;
mod routing;
#[allow(missing_docs)]
pub mod saving;
pub mod stores;
#[cfg(test)]
mod test_utils;
mod timezone;
#[allow(missing_docs)]
pub mod transaction;
mod user;

pub use app_state::{AnalyticsState, AppState};
pub use auth::USER_ID_HEADER;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::{MONEY_DECIMAL_PLACES, round_money};
pub use pagination::{DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, PageInfo, PageResponse};
pub use patch::Patch;
pub use response::{DataResponse, Message};
pub use routing::build_router;
pub use user::UserID;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

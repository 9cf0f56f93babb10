#![allow(missing_docs)]

//! Helpers shared by the unit tests.

mod memory;

pub(crate) use memory::{MemoryLedger, debt_with_remaining, expense_on, income_on};

use rusqlite::Connection;

use crate::{
    analytics::MonthLabels,
    stores::sqlite::{SQLAppState, create_app_state},
};

/// An app state backed by a fresh in-memory SQLite database.
pub(crate) fn get_test_app_state() -> SQLAppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(connection, "Etc/UTC", MonthLabels::English)
        .expect("Could not create app state.")
}

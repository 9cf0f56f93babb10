//! Implements the store traits on a single SQLite connection.

mod category;
mod debt;
mod saving;
mod transaction;

pub use category::{create_category_table, seed_default_categories};
pub use debt::create_debt_tables;
pub use saving::create_saving_tables;
pub use transaction::create_income_and_expense_tables;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{AppState, Error, analytics::MonthLabels, db::initialize};

/// Stores every kind of ledger record in a SQLite database.
///
/// Clones share the same connection.
#[derive(Debug, Clone)]
pub struct SQLiteLedger {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedger {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The caller is responsible for initializing the database, see
    /// [initialize](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire the database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteLedger>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the ledger
/// records and the default categories.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(
    db_connection: Connection,
    local_timezone: &str,
    month_labels: MonthLabels,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let ledger = SQLiteLedger::new(Arc::new(Mutex::new(db_connection)));

    Ok(AppState::new(ledger, local_timezone, month_labels))
}

#[cfg(test)]
pub(crate) fn get_test_ledger() -> SQLiteLedger {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&connection).expect("Could not initialize database.");

    SQLiteLedger::new(Arc::new(Mutex::new(connection)))
}

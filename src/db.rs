//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::stores::sqlite::{
    create_category_table, create_debt_tables, create_income_and_expense_tables,
    create_saving_tables, seed_default_categories,
};

/// Create the tables for the ledger's records and add the default categories.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if a table could not be created or the default
/// categories could not be inserted.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_income_and_expense_tables(&transaction)?;
    create_debt_tables(&transaction)?;
    create_saving_tables(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_twice_keeps_one_set_of_defaults() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("first initialization failed");
        let count_after_first: i64 = connection
            .query_row("SELECT COUNT(*) FROM category WHERE is_default = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        initialize(&connection).expect("second initialization failed");
        let count_after_second: i64 = connection
            .query_row("SELECT COUNT(*) FROM category WHERE is_default = 1", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert!(count_after_first > 0);
        assert_eq!(count_after_first, count_after_second);
    }
}

//! Implements a SQLite backed savings goal store.

use rust_decimal::Decimal;
use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, UserID,
    money::get_decimal,
    saving::{NewSaving, NewSavingDeposit, Saving, SavingDeposit, SavingDepositId, SavingId},
    stores::SavingStore,
};

use super::SQLiteLedger;

const SAVING_COLUMNS: &str =
    "id, name, target_amount, current_amount, target_date, description, color, user_id";
const DEPOSIT_COLUMNS: &str = "id, amount, date, note, saving_id";

impl SavingStore for SQLiteLedger {
    fn create_saving(&self, user_id: UserID, saving: NewSaving) -> Result<Saving, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "INSERT INTO saving (name, target_amount, current_amount, target_date, description, color, user_id)
                 VALUES (?1, ?2, '0', ?3, ?4, ?5, ?6)
                 RETURNING {SAVING_COLUMNS}"
            ))?
            .query_row(
                (
                    saving.name,
                    saving.target_amount.to_string(),
                    saving.target_date,
                    saving.description,
                    saving.color,
                    user_id.as_i64(),
                ),
                map_saving_row,
            )
            .map_err(|error| error.into())
    }

    fn get_saving(&self, user_id: UserID, saving_id: SavingId) -> Result<Saving, Error> {
        let connection = self.lock()?;

        select_saving(&connection, user_id, saving_id)
    }

    fn get_savings(&self, user_id: UserID) -> Result<Vec<Saving>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {SAVING_COLUMNS} FROM saving WHERE user_id = ?1 ORDER BY id ASC"
            ))?
            .query_map([user_id.as_i64()], map_saving_row)?
            .map(|maybe_saving| maybe_saving.map_err(|error| error.into()))
            .collect()
    }

    fn delete_saving(&self, user_id: UserID, saving_id: SavingId) -> Result<(), Error> {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        transaction.execute(
            "DELETE FROM saving_deposit
             WHERE saving_id IN (SELECT id FROM saving WHERE id = ?1 AND user_id = ?2)",
            (saving_id, user_id.as_i64()),
        )?;
        let rows_affected = transaction.execute(
            "DELETE FROM saving WHERE id = ?1 AND user_id = ?2",
            (saving_id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        transaction.commit()?;

        Ok(())
    }

    fn get_saving_deposits(&self, saving_id: SavingId) -> Result<Vec<SavingDeposit>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {DEPOSIT_COLUMNS} FROM saving_deposit WHERE saving_id = ?1
                 ORDER BY date DESC, id DESC"
            ))?
            .query_map([saving_id], map_deposit_row)?
            .map(|maybe_deposit| maybe_deposit.map_err(|error| error.into()))
            .collect()
    }

    fn add_saving_deposit<F>(
        &self,
        user_id: UserID,
        saving_id: SavingId,
        deposit: NewSavingDeposit,
        next_current: F,
    ) -> Result<SavingDeposit, Error>
    where
        F: FnOnce(&Saving, &NewSavingDeposit) -> Result<Decimal, Error>,
    {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let saving = select_saving(&transaction, user_id, saving_id)?;
        let current = next_current(&saving, &deposit)?;

        let deposit = transaction
            .prepare(&format!(
                "INSERT INTO saving_deposit (amount, date, note, saving_id)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {DEPOSIT_COLUMNS}"
            ))?
            .query_row(
                (deposit.amount.to_string(), deposit.date, deposit.note, saving_id),
                map_deposit_row,
            )?;
        set_current(&transaction, saving_id, current)?;

        transaction.commit()?;

        Ok(deposit)
    }

    fn delete_saving_deposit<F>(
        &self,
        user_id: UserID,
        deposit_id: SavingDepositId,
        next_current: F,
    ) -> Result<SavingDeposit, Error>
    where
        F: FnOnce(&Saving, &SavingDeposit) -> Result<Decimal, Error>,
    {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let deposit = transaction
            .prepare(
                "SELECT d.id, d.amount, d.date, d.note, d.saving_id
                 FROM saving_deposit d INNER JOIN saving s ON s.id = d.saving_id
                 WHERE d.id = ?1 AND s.user_id = ?2",
            )?
            .query_row((deposit_id, user_id.as_i64()), map_deposit_row)?;
        let saving = select_saving(&transaction, user_id, deposit.saving_id)?;
        let current = next_current(&saving, &deposit)?;

        transaction.execute("DELETE FROM saving_deposit WHERE id = ?1", [deposit_id])?;
        set_current(&transaction, saving.id, current)?;

        transaction.commit()?;

        Ok(deposit)
    }
}

fn select_saving(
    connection: &Connection,
    user_id: UserID,
    saving_id: SavingId,
) -> Result<Saving, Error> {
    connection
        .prepare(&format!(
            "SELECT {SAVING_COLUMNS} FROM saving WHERE id = ?1 AND user_id = ?2"
        ))?
        .query_row((saving_id, user_id.as_i64()), map_saving_row)
        .map_err(|error| error.into())
}

fn set_current(connection: &Connection, saving_id: SavingId, current: Decimal) -> Result<(), Error> {
    connection.execute(
        "UPDATE saving SET current_amount = ?1 WHERE id = ?2",
        (current.to_string(), saving_id),
    )?;

    Ok(())
}

/// Initialize the savings goal and deposit tables.
pub fn create_saving_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS saving (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            target_amount TEXT NOT NULL,
            current_amount TEXT NOT NULL,
            target_date TEXT,
            description TEXT,
            color TEXT,
            user_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_saving_user ON saving(user_id);

        CREATE TABLE IF NOT EXISTS saving_deposit (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            note TEXT,
            saving_id INTEGER NOT NULL,
            FOREIGN KEY(saving_id) REFERENCES saving(id) ON UPDATE CASCADE ON DELETE CASCADE
        );",
    )?;

    Ok(())
}

fn map_saving_row(row: &Row) -> Result<Saving, rusqlite::Error> {
    Ok(Saving {
        id: row.get(0)?,
        name: row.get(1)?,
        target_amount: get_decimal(row, 2)?,
        current_amount: get_decimal(row, 3)?,
        target_date: row.get(4)?,
        description: row.get(5)?,
        color: row.get(6)?,
        user_id: UserID::new(row.get(7)?),
    })
}

fn map_deposit_row(row: &Row) -> Result<SavingDeposit, rusqlite::Error> {
    Ok(SavingDeposit {
        id: row.get(0)?,
        amount: get_decimal(row, 1)?,
        date: row.get(2)?,
        note: row.get(3)?,
        saving_id: row.get(4)?,
    })
}

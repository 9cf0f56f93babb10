//! Implements a SQLite backed debt store.

use rust_decimal::Decimal;
use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, UserID,
    debt::{Debt, DebtId, DebtPayment, DebtPaymentId, NewDebt, NewDebtPayment},
    money::{get_decimal, get_optional_decimal},
    stores::DebtStore,
};

use super::SQLiteLedger;

const DEBT_COLUMNS: &str = "id, name, total_amount, remaining_amount, interest_rate, \
    minimum_payment, due_date, start_date, category_id, user_id";
const PAYMENT_COLUMNS: &str = "id, amount, date, note, debt_id";

impl DebtStore for SQLiteLedger {
    fn create_debt(&self, user_id: UserID, debt: NewDebt) -> Result<Debt, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "INSERT INTO debt (name, total_amount, remaining_amount, interest_rate,
                    minimum_payment, due_date, start_date, category_id, user_id)
                 VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING {DEBT_COLUMNS}"
            ))?
            .query_row(
                (
                    debt.name,
                    debt.total_amount.to_string(),
                    debt.interest_rate.map(|rate| rate.to_string()),
                    debt.minimum_payment.map(|payment| payment.to_string()),
                    debt.due_date,
                    debt.start_date,
                    debt.category_id,
                    user_id.as_i64(),
                ),
                map_debt_row,
            )
            .map_err(|error| error.into())
    }

    fn get_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<Debt, Error> {
        let connection = self.lock()?;

        select_debt(&connection, user_id, debt_id)
    }

    fn get_debts(&self, user_id: UserID, settled: Option<bool>) -> Result<Vec<Debt>, Error> {
        let connection = self.lock()?;

        let debts = connection
            .prepare(&format!(
                "SELECT {DEBT_COLUMNS} FROM debt WHERE user_id = ?1 ORDER BY start_date DESC, id DESC"
            ))?
            .query_map([user_id.as_i64()], map_debt_row)?
            .collect::<Result<Vec<Debt>, rusqlite::Error>>()?;

        // Amounts are stored as text, so the settled filter cannot be done in SQL.
        Ok(match settled {
            Some(settled) => debts
                .into_iter()
                .filter(|debt| debt.is_settled() == settled)
                .collect(),
            None => debts,
        })
    }

    fn update_debt<F>(&self, user_id: UserID, debt_id: DebtId, edit: F) -> Result<Debt, Error>
    where
        F: FnOnce(Debt) -> Result<Debt, Error>,
    {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let current = select_debt(&transaction, user_id, debt_id)?;
        let updated = edit(current)?;

        transaction.execute(
            "UPDATE debt
             SET name = ?1, total_amount = ?2, remaining_amount = ?3, interest_rate = ?4,
                 minimum_payment = ?5, due_date = ?6, start_date = ?7, category_id = ?8
             WHERE id = ?9 AND user_id = ?10",
            (
                &updated.name,
                updated.total_amount.to_string(),
                updated.remaining_amount.to_string(),
                updated.interest_rate.map(|rate| rate.to_string()),
                updated.minimum_payment.map(|payment| payment.to_string()),
                updated.due_date,
                updated.start_date,
                updated.category_id,
                debt_id,
                user_id.as_i64(),
            ),
        )?;

        transaction.commit()?;

        Ok(updated)
    }

    fn delete_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<(), Error> {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        transaction.execute(
            "DELETE FROM debt_payment
             WHERE debt_id IN (SELECT id FROM debt WHERE id = ?1 AND user_id = ?2)",
            (debt_id, user_id.as_i64()),
        )?;
        let rows_affected = transaction.execute(
            "DELETE FROM debt WHERE id = ?1 AND user_id = ?2",
            (debt_id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        transaction.commit()?;

        Ok(())
    }

    fn get_debt_payments(&self, debt_id: DebtId) -> Result<Vec<DebtPayment>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {PAYMENT_COLUMNS} FROM debt_payment WHERE debt_id = ?1
                 ORDER BY date DESC, id DESC"
            ))?
            .query_map([debt_id], map_payment_row)?
            .map(|maybe_payment| maybe_payment.map_err(|error| error.into()))
            .collect()
    }

    fn add_debt_payment<F>(
        &self,
        user_id: UserID,
        debt_id: DebtId,
        payment: NewDebtPayment,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &NewDebtPayment) -> Result<Decimal, Error>,
    {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let debt = select_debt(&transaction, user_id, debt_id)?;
        let remaining = next_remaining(&debt, &payment)?;

        let payment = transaction
            .prepare(&format!(
                "INSERT INTO debt_payment (amount, date, note, debt_id)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {PAYMENT_COLUMNS}"
            ))?
            .query_row(
                (payment.amount.to_string(), payment.date, payment.note, debt_id),
                map_payment_row,
            )?;
        set_remaining(&transaction, debt_id, remaining)?;

        transaction.commit()?;

        Ok(payment)
    }

    fn delete_debt_payment<F>(
        &self,
        user_id: UserID,
        payment_id: DebtPaymentId,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &DebtPayment) -> Result<Decimal, Error>,
    {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let payment = transaction
            .prepare(
                "SELECT p.id, p.amount, p.date, p.note, p.debt_id
                 FROM debt_payment p INNER JOIN debt d ON d.id = p.debt_id
                 WHERE p.id = ?1 AND d.user_id = ?2",
            )?
            .query_row((payment_id, user_id.as_i64()), map_payment_row)?;
        let debt = select_debt(&transaction, user_id, payment.debt_id)?;
        let remaining = next_remaining(&debt, &payment)?;

        transaction.execute("DELETE FROM debt_payment WHERE id = ?1", [payment_id])?;
        set_remaining(&transaction, debt.id, remaining)?;

        transaction.commit()?;

        Ok(payment)
    }
}

fn select_debt(connection: &Connection, user_id: UserID, debt_id: DebtId) -> Result<Debt, Error> {
    connection
        .prepare(&format!(
            "SELECT {DEBT_COLUMNS} FROM debt WHERE id = ?1 AND user_id = ?2"
        ))?
        .query_row((debt_id, user_id.as_i64()), map_debt_row)
        .map_err(|error| error.into())
}

fn set_remaining(connection: &Connection, debt_id: DebtId, remaining: Decimal) -> Result<(), Error> {
    connection.execute(
        "UPDATE debt SET remaining_amount = ?1 WHERE id = ?2",
        (remaining.to_string(), debt_id),
    )?;

    Ok(())
}

/// Initialize the debt and debt payment tables.
pub fn create_debt_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS debt (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            total_amount TEXT NOT NULL,
            remaining_amount TEXT NOT NULL,
            interest_rate TEXT,
            minimum_payment TEXT,
            due_date TEXT,
            start_date TEXT NOT NULL,
            category_id INTEGER,
            user_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_debt_user ON debt(user_id);

        CREATE TABLE IF NOT EXISTS debt_payment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            note TEXT,
            debt_id INTEGER NOT NULL,
            FOREIGN KEY(debt_id) REFERENCES debt(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_debt_payment_debt ON debt_payment(debt_id);",
    )?;

    Ok(())
}

fn map_debt_row(row: &Row) -> Result<Debt, rusqlite::Error> {
    Ok(Debt {
        id: row.get(0)?,
        name: row.get(1)?,
        total_amount: get_decimal(row, 2)?,
        remaining_amount: get_decimal(row, 3)?,
        interest_rate: get_optional_decimal(row, 4)?,
        minimum_payment: get_optional_decimal(row, 5)?,
        due_date: row.get(6)?,
        start_date: row.get(7)?,
        category_id: row.get(8)?,
        user_id: UserID::new(row.get(9)?),
    })
}

fn map_payment_row(row: &Row) -> Result<DebtPayment, rusqlite::Error> {
    Ok(DebtPayment {
        id: row.get(0)?,
        amount: get_decimal(row, 1)?,
        date: row.get(2)?,
        note: row.get(3)?,
        debt_id: row.get(4)?,
    })
}

//! Implements a SQLite backed income and expense store.

use std::{collections::BTreeMap, ops::RangeInclusive};

use rust_decimal::Decimal;
use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::Date;

use crate::{
    Error, UserID,
    category::CategoryId,
    money::{add_amount, get_decimal},
    stores::{
        AmountTotal, CategoryTotal, SourceTotal, TransactionFilter, TransactionQuery,
        TransactionStore,
    },
    transaction::{Expense, Income, NewExpense, NewIncome, TransactionId, TransactionKind},
};

use super::SQLiteLedger;

const INCOME_COLUMNS: &str = "id, amount, description, source, date, is_recurring, category_id, user_id";
const EXPENSE_COLUMNS: &str = "id, amount, description, date, is_recurring, category_id, user_id";

impl TransactionStore for SQLiteLedger {
    fn create_income(&self, user_id: UserID, income: NewIncome) -> Result<Income, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "INSERT INTO income (amount, description, source, date, is_recurring, category_id, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {INCOME_COLUMNS}"
            ))?
            .query_row(
                (
                    income.amount.to_string(),
                    income.description,
                    income.source,
                    income.date,
                    income.is_recurring,
                    income.category_id,
                    user_id.as_i64(),
                ),
                map_income_row,
            )
            .map_err(|error| error.into())
    }

    fn create_expense(&self, user_id: UserID, expense: NewExpense) -> Result<Expense, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "INSERT INTO expense (amount, description, date, is_recurring, category_id, user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 RETURNING {EXPENSE_COLUMNS}"
            ))?
            .query_row(
                (
                    expense.amount.to_string(),
                    expense.description,
                    expense.date,
                    expense.is_recurring,
                    expense.category_id,
                    user_id.as_i64(),
                ),
                map_expense_row,
            )
            .map_err(|error| error.into())
    }

    fn get_income(&self, user_id: UserID, id: TransactionId) -> Result<Income, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {INCOME_COLUMNS} FROM income WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, user_id.as_i64()), map_income_row)
            .map_err(|error| error.into())
    }

    fn get_expense(&self, user_id: UserID, id: TransactionId) -> Result<Expense, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = ?1 AND user_id = ?2"
            ))?
            .query_row((id, user_id.as_i64()), map_expense_row)
            .map_err(|error| error.into())
    }

    fn update_income(&self, income: &Income) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE income
             SET amount = ?1, description = ?2, source = ?3, date = ?4, is_recurring = ?5, category_id = ?6
             WHERE id = ?7 AND user_id = ?8",
            (
                income.amount.to_string(),
                &income.description,
                &income.source,
                income.date,
                income.is_recurring,
                income.category_id,
                income.id,
                income.user_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn update_expense(&self, expense: &Expense) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE expense
             SET amount = ?1, description = ?2, date = ?3, is_recurring = ?4, category_id = ?5
             WHERE id = ?6 AND user_id = ?7",
            (
                expense.amount.to_string(),
                &expense.description,
                expense.date,
                expense.is_recurring,
                expense.category_id,
                expense.id,
                expense.user_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn delete_transaction(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        id: TransactionId,
    ) -> Result<(), Error> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            &format!("DELETE FROM {} WHERE id = ?1 AND user_id = ?2", kind.table()),
            (id, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn get_incomes(&self, user_id: UserID, query: &TransactionQuery) -> Result<Vec<Income>, Error> {
        let connection = self.lock()?;

        query_records(
            &connection,
            TransactionKind::Income,
            INCOME_COLUMNS,
            user_id,
            query,
            map_income_row,
        )
    }

    fn get_expenses(
        &self,
        user_id: UserID,
        query: &TransactionQuery,
    ) -> Result<Vec<Expense>, Error> {
        let connection = self.lock()?;

        query_records(
            &connection,
            TransactionKind::Expense,
            EXPENSE_COLUMNS,
            user_id,
            query,
            map_expense_row,
        )
    }

    fn sum_transactions(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<AmountTotal, Error> {
        let connection = self.lock()?;

        let mut sql = format!("SELECT t.amount FROM {} t WHERE t.user_id = ?", kind.table());
        let mut params = vec![Value::Integer(user_id.as_i64())];
        push_filter(&mut sql, &mut params, kind, filter);

        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params_from_iter(params), |row| get_decimal(row, 0))?;

        let mut totals = AmountTotal::default();
        for amount in rows {
            totals.total = add_amount(totals.total, amount?)?;
            totals.count += 1;
        }

        Ok(totals)
    }

    fn sum_transactions_by_category(
        &self,
        kind: TransactionKind,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let connection = self.lock()?;

        let mut sql = format!(
            "SELECT t.category_id, t.amount FROM {} t WHERE t.user_id = ?",
            kind.table()
        );
        let mut params = vec![Value::Integer(user_id.as_i64())];
        push_filter(&mut sql, &mut params, kind, filter);

        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params_from_iter(params), |row| {
            Ok((row.get::<_, Option<CategoryId>>(0)?, get_decimal(row, 1)?))
        })?;

        let groups = group_amounts(rows)?;

        Ok(groups
            .into_iter()
            .map(|(category_id, AmountTotal { total, count })| CategoryTotal {
                category_id,
                total,
                count,
            })
            .collect())
    }

    fn sum_incomes_by_source(
        &self,
        user_id: UserID,
        filter: &TransactionFilter,
    ) -> Result<Vec<SourceTotal>, Error> {
        let connection = self.lock()?;

        let mut sql = "SELECT t.source, t.amount FROM income t WHERE t.user_id = ?".to_owned();
        let mut params = vec![Value::Integer(user_id.as_i64())];
        push_filter(&mut sql, &mut params, TransactionKind::Income, filter);

        let mut statement = connection.prepare(&sql)?;
        let rows = statement.query_map(params_from_iter(params), |row| {
            Ok((row.get::<_, Option<String>>(0)?, get_decimal(row, 1)?))
        })?;

        let groups = group_amounts(rows)?;

        Ok(groups
            .into_iter()
            .map(|(source, AmountTotal { total, count })| SourceTotal {
                source,
                total,
                count,
            })
            .collect())
    }
}

/// Total the amounts of `rows` by their key.
///
/// Amounts are stored as text, so the sums cannot be done in SQL.
fn group_amounts<K: Ord>(
    rows: impl Iterator<Item = Result<(K, Decimal), rusqlite::Error>>,
) -> Result<BTreeMap<K, AmountTotal>, Error> {
    let mut groups: BTreeMap<K, AmountTotal> = BTreeMap::new();

    for row in rows {
        let (key, amount) = row?;
        let group = groups.entry(key).or_default();
        group.total = add_amount(group.total, amount)?;
        group.count += 1;
    }

    Ok(groups)
}

fn push_date_range(sql: &mut String, params: &mut Vec<Value>, date_range: &RangeInclusive<Date>) {
    sql.push_str(" AND t.date BETWEEN ? AND ?");
    params.push(Value::Text(date_range.start().to_string()));
    params.push(Value::Text(date_range.end().to_string()));
}

fn push_filter(
    sql: &mut String,
    params: &mut Vec<Value>,
    kind: TransactionKind,
    filter: &TransactionFilter,
) {
    if let Some(date_range) = &filter.date_range {
        push_date_range(sql, params, date_range);
    }

    if let Some(category_id) = filter.category_id {
        sql.push_str(" AND t.category_id = ?");
        params.push(Value::Integer(category_id));
    }

    if let Some(category_type) = filter.category_type {
        sql.push_str(" AND t.category_id IN (SELECT id FROM category WHERE type = ?)");
        params.push(Value::Text(category_type.as_str().to_owned()));
    }

    if let (TransactionKind::Income, Some(source)) = (kind, &filter.source) {
        sql.push_str(" AND instr(t.source, ?) > 0");
        params.push(Value::Text(source.clone()));
    }
}

fn query_records<T>(
    connection: &Connection,
    kind: TransactionKind,
    columns: &str,
    user_id: UserID,
    query: &TransactionQuery,
    map_row: fn(&Row) -> Result<T, rusqlite::Error>,
) -> Result<Vec<T>, Error> {
    let mut sql = format!("SELECT {columns} FROM {} t WHERE t.user_id = ?", kind.table());
    let mut params = vec![Value::Integer(user_id.as_i64())];
    push_filter(&mut sql, &mut params, kind, &query.filter);

    sql.push_str(" ORDER BY t.date DESC, t.id DESC");

    match query.limit {
        Some(limit) => {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(Value::Integer(limit as i64));
            params.push(Value::Integer(query.offset as i64));
        }
        None if query.offset > 0 => {
            sql.push_str(" LIMIT -1 OFFSET ?");
            params.push(Value::Integer(query.offset as i64));
        }
        None => {}
    }

    connection
        .prepare(&sql)?
        .query_map(params_from_iter(params), map_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Initialize the income and expense tables and indexes.
///
/// Category IDs are not foreign keys so that records outlive their category's
/// removal from the shared defaults.
pub fn create_income_and_expense_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            source TEXT,
            date TEXT NOT NULL,
            is_recurring INTEGER NOT NULL DEFAULT 0,
            category_id INTEGER,
            user_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_income_user_date ON income(user_id, date);

        CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount TEXT NOT NULL,
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            is_recurring INTEGER NOT NULL DEFAULT 0,
            category_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_user_date ON expense(user_id, date);",
    )?;

    Ok(())
}

fn map_income_row(row: &Row) -> Result<Income, rusqlite::Error> {
    Ok(Income {
        id: row.get(0)?,
        amount: get_decimal(row, 1)?,
        description: row.get(2)?,
        source: row.get(3)?,
        date: row.get(4)?,
        is_recurring: row.get(5)?,
        category_id: row.get(6)?,
        user_id: UserID::new(row.get(7)?),
    })
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: get_decimal(row, 1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        is_recurring: row.get(4)?,
        category_id: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
    })
}

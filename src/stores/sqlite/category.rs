//! Implements a SQLite backed category store.

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior, params_from_iter};

use crate::{
    Error, UserID,
    category::{Category, CategoryId, CategoryName, CategoryType, NewCategory},
    stores::CategoryStore,
};

use super::SQLiteLedger;

const CATEGORY_COLUMNS: &str = "id, name, type, icon, color, is_default, user_id";

/// The categories shared by every user: (name, type, icon, color).
const DEFAULT_CATEGORIES: [(&str, CategoryType, &str, &str); 21] = [
    ("Rent", CategoryType::Fixed, "home", "#3B82F6"),
    ("Water", CategoryType::Fixed, "droplet", "#06B6D4"),
    ("Electricity", CategoryType::Fixed, "zap", "#F59E0B"),
    ("Gas", CategoryType::Fixed, "flame", "#EF4444"),
    ("Internet", CategoryType::Fixed, "wifi", "#8B5CF6"),
    ("Phone", CategoryType::Fixed, "phone", "#10B981"),
    ("Insurance", CategoryType::Fixed, "shield", "#6366F1"),
    ("Groceries", CategoryType::Variable, "utensils", "#F97316"),
    ("Health", CategoryType::Variable, "heart", "#EC4899"),
    ("Transport", CategoryType::Variable, "car", "#14B8A6"),
    ("Clothing", CategoryType::Variable, "shirt", "#A855F7"),
    ("Entertainment", CategoryType::Variable, "gamepad-2", "#F43F5E"),
    ("Gifts", CategoryType::Variable, "gift", "#D946EF"),
    ("Snacks", CategoryType::Variable, "cookie", "#FB923C"),
    ("Personal loan", CategoryType::Debt, "banknote", "#DC2626"),
    ("Credit card", CategoryType::Debt, "credit-card", "#EA580C"),
    ("Mortgage", CategoryType::Debt, "building", "#B91C1C"),
    ("Salary", CategoryType::Income, "briefcase", "#22C55E"),
    ("Freelance", CategoryType::Income, "laptop", "#16A34A"),
    ("Investments", CategoryType::Income, "trending-up", "#15803D"),
    ("Other income", CategoryType::Income, "plus-circle", "#166534"),
];

impl CategoryStore for SQLiteLedger {
    fn create_category(&self, user_id: UserID, category: NewCategory) -> Result<Category, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "INSERT INTO category (name, type, icon, color, is_default, user_id)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5)
                 RETURNING {CATEGORY_COLUMNS}"
            ))?
            .query_row(
                (
                    category.name.as_ref(),
                    category.category_type,
                    &category.icon,
                    &category.color,
                    user_id.as_i64(),
                ),
                map_row,
            )
            .map_err(|error| error.into())
    }

    fn get_visible_category(
        &self,
        user_id: UserID,
        category_id: CategoryId,
    ) -> Result<Category, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category
                 WHERE id = ?1 AND (user_id = ?2 OR (user_id IS NULL AND is_default = 1))"
            ))?
            .query_row((category_id, user_id.as_i64()), map_row)
            .map_err(|error| error.into())
    }

    fn get_visible_categories(
        &self,
        user_id: UserID,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category
                 WHERE (user_id = ?1 OR (user_id IS NULL AND is_default = 1))
                 AND (?2 IS NULL OR type = ?2)
                 ORDER BY name ASC, id ASC"
            ))?
            .query_map((user_id.as_i64(), category_type), map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn get_categories_by_ids(&self, category_ids: &[CategoryId]) -> Result<Vec<Category>, Error> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let connection = self.lock()?;
        let placeholders = vec!["?"; category_ids.len()].join(", ");

        connection
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE id IN ({placeholders}) ORDER BY id ASC"
            ))?
            .query_map(params_from_iter(category_ids), map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    fn update_category(&self, category: &Category) -> Result<(), Error> {
        let Some(user_id) = category.user_id else {
            return Err(Error::NotFound);
        };

        let connection = self.lock()?;

        let rows_affected = connection.execute(
            "UPDATE category SET name = ?1, icon = ?2, color = ?3
             WHERE id = ?4 AND user_id = ?5 AND is_default = 0",
            (
                category.name.as_ref(),
                &category.icon,
                &category.color,
                category.id,
                user_id.as_i64(),
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    fn delete_category(&self, user_id: UserID, category_id: CategoryId) -> Result<(), Error> {
        let connection = self.lock()?;
        let transaction = SqlTransaction::new_unchecked(&connection, TransactionBehavior::Immediate)?;

        let name: String = transaction.query_row(
            "SELECT name FROM category WHERE id = ?1 AND user_id = ?2",
            (category_id, user_id.as_i64()),
            |row| row.get(0),
        )?;

        let references = count_references(&transaction, category_id)?;
        if references > 0 {
            return Err(Error::Conflict(format!(
                "the category \"{name}\" is used by {references} record(s)"
            )));
        }

        transaction.execute("DELETE FROM category WHERE id = ?1", [category_id])?;
        transaction.commit()?;

        Ok(())
    }
}

/// Count the incomes, expenses and debts that refer to `category_id`.
fn count_references(connection: &Connection, category_id: CategoryId) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        "SELECT (SELECT COUNT(*) FROM income WHERE category_id = ?1)
              + (SELECT COUNT(*) FROM expense WHERE category_id = ?1)
              + (SELECT COUNT(*) FROM debt WHERE category_id = ?1)",
        [category_id],
        |row| row.get(0),
    )?;

    Ok(count as u64)
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('FIXED', 'VARIABLE', 'DEBT', 'INCOME')),
            icon TEXT,
            color TEXT,
            is_default INTEGER NOT NULL DEFAULT 0,
            user_id INTEGER,
            UNIQUE(user_id, name, type)
        );

        CREATE INDEX IF NOT EXISTS idx_category_user ON category(user_id);",
    )?;

    Ok(())
}

/// Add the shared default categories if they have not been added yet.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let default_count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM category WHERE is_default = 1",
        [],
        |row| row.get(0),
    )?;

    if default_count > 0 {
        return Ok(());
    }

    let mut statement = connection.prepare(
        "INSERT INTO category (name, type, icon, color, is_default, user_id)
         VALUES (?1, ?2, ?3, ?4, 1, NULL)",
    )?;

    for (name, category_type, icon, color) in DEFAULT_CATEGORIES {
        statement.execute((name, category_type, icon, color))?;
    }

    tracing::info!("Added {} default categories", DEFAULT_CATEGORIES.len());

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(1)?;
    let user_id: Option<i64> = row.get(6)?;

    Ok(Category {
        id: row.get(0)?,
        name: CategoryName::new_unchecked(&raw_name),
        category_type: row.get(2)?,
        icon: row.get(3)?,
        color: row.get(4)?,
        is_default: row.get(5)?,
        user_id: user_id.map(UserID::new),
    })
}

//! Core income and expense domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{UserID, category::CategoryId, patch::Patch};

/// Database identifier for an income or an expense.
pub type TransactionId = i64;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The table that holds records of this kind.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// Money received by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: TransactionId,
    pub amount: Decimal,
    pub description: String,
    pub source: Option<String>,
    pub date: Date,
    pub is_recurring: bool,
    pub category_id: Option<CategoryId>,
    pub user_id: UserID,
}

/// Money spent by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: TransactionId,
    pub amount: Decimal,
    pub description: String,
    pub date: Date,
    pub is_recurring: bool,
    pub category_id: CategoryId,
    pub user_id: UserID,
}

/// A validated income that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub amount: Decimal,
    pub description: String,
    pub source: Option<String>,
    pub date: Date,
    pub is_recurring: bool,
    pub category_id: Option<CategoryId>,
}

/// A validated expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub description: String,
    pub date: Date,
    pub is_recurring: bool,
    pub category_id: CategoryId,
}

/// The request body for creating an income.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeInput {
    pub amount: Decimal,
    pub description: String,
    pub source: Option<String>,
    pub date: Date,
    #[serde(default)]
    pub is_recurring: bool,
    pub category_id: Option<CategoryId>,
}

/// The request body for creating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub amount: Decimal,
    pub description: String,
    pub date: Date,
    #[serde(default)]
    pub is_recurring: bool,
    pub category_id: CategoryId,
}

/// The request body for editing an income. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    #[serde(default)]
    pub source: Patch<String>,
    pub date: Option<Date>,
    pub is_recurring: Option<bool>,
    #[serde(default)]
    pub category_id: Patch<CategoryId>,
}

/// The request body for editing an expense. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<Date>,
    pub is_recurring: Option<bool>,
    pub category_id: Option<CategoryId>,
}

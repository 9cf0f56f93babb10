//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::{Error, UserID};

/// Database identifier for a category.
pub type CategoryId = i64;

/// What a category may be attached to.
///
/// Expenses use [CategoryType::Fixed] or [CategoryType::Variable], incomes use
/// [CategoryType::Income] and debts use [CategoryType::Debt].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// A recurring expense with a predictable amount, e.g. rent.
    Fixed,
    /// An expense that changes from month to month, e.g. groceries.
    Variable,
    /// A kind of debt, e.g. a mortgage.
    Debt,
    /// A source of income, e.g. salary.
    Income,
}

impl CategoryType {
    /// The name used for the type in the database and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Fixed => "FIXED",
            CategoryType::Variable => "VARIABLE",
            CategoryType::Debt => "DEBT",
            CategoryType::Income => "INCOME",
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIXED" => Ok(CategoryType::Fixed),
            "VARIABLE" => Ok(CategoryType::Variable),
            "DEBT" => Ok(CategoryType::Debt),
            "INCOME" => Ok(CategoryType::Income),
            other => Err(Error::validation(
                "type",
                format!("\"{other}\" is not one of FIXED, VARIABLE, DEBT or INCOME"),
            )),
        }
    }
}

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::validation("name", "cannot be empty"))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label for grouping incomes, expenses and debts.
///
/// Default categories are shared by every user and have no owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_default: bool,
    pub user_id: Option<UserID>,
}

/// A validated category that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub category_type: CategoryType,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// The request body for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl TryFrom<CategoryInput> for NewCategory {
    type Error = Error;

    fn try_from(input: CategoryInput) -> Result<Self, Self::Error> {
        Ok(NewCategory {
            name: CategoryName::new(&input.name)?,
            category_type: input.category_type,
            icon: input.icon,
            color: input.color,
        })
    }
}

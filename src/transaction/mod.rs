//! Incomes and expenses.

mod domain;
mod expense;
mod income;

pub use domain::{
    Expense, ExpenseInput, ExpenseUpdate, Income, IncomeInput, IncomeUpdate, NewExpense,
    NewIncome, TransactionId, TransactionKind,
};
pub use expense::{
    ExpenseSummary, Subtotal, SummaryQuery, create_expense, create_expense_endpoint,
    delete_expense_endpoint, expense_summary_endpoint, expenses_by_category,
    expenses_by_category_endpoint, get_expense_endpoint, list_expenses, list_expenses_endpoint,
    summarize_expenses, update_expense, update_expense_endpoint,
};
pub use income::{
    IncomeSummary, create_income, create_income_endpoint, delete_income_endpoint,
    get_income_endpoint, income_summary_endpoint, list_incomes, list_incomes_endpoint,
    summarize_incomes, update_income, update_income_endpoint,
};

use crate::Error;

/// Trim `description` and check that something is left.
pub(crate) fn validate_description(description: &str) -> Result<String, Error> {
    let description = description.trim();

    if description.is_empty() {
        return Err(Error::validation("description", "cannot be empty"));
    }

    Ok(description.to_owned())
}

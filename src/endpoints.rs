//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/debts/{debt_id}', use [format_endpoint].

/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";

/// The route for the current month's overview.
pub const DASHBOARD: &str = "/api/analytics/dashboard";
/// The route for totals of a single calendar month.
pub const MONTHLY: &str = "/api/analytics/monthly";
/// The route for month-by-month totals.
pub const COMPARISON: &str = "/api/analytics/comparison";
/// The route for averages and trend directions.
pub const TRENDS: &str = "/api/analytics/trends";

/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to get, edit and delete a category.
pub const CATEGORY: &str = "/api/categories/{category_id}";

/// The route to list and create incomes.
pub const INCOMES: &str = "/api/incomes";
/// The route for income totals per source and per category.
pub const INCOME_SUMMARY: &str = "/api/incomes/summary";
/// The route to access a single income.
pub const INCOME: &str = "/api/incomes/{income_id}";

/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route for expense totals split by fixed and variable categories.
pub const EXPENSE_SUMMARY: &str = "/api/expenses/summary";
/// The route for expense totals per category.
pub const EXPENSES_BY_CATEGORY: &str = "/api/expenses/by-category";
/// The route to access a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";

/// The route to list and create debts.
pub const DEBTS: &str = "/api/debts";
/// The route for totals over all debts.
pub const DEBT_SUMMARY: &str = "/api/debts/summary";
/// The route to access a single debt.
pub const DEBT: &str = "/api/debts/{debt_id}";
/// The route to list and record payments against a debt.
pub const DEBT_PAYMENTS: &str = "/api/debts/{debt_id}/payments";
/// The route to delete a payment.
pub const DEBT_PAYMENT: &str = "/api/debts/payments/{payment_id}";

/// The route to list and create savings goals.
pub const SAVINGS: &str = "/api/savings";
/// The route for totals over all savings goals.
pub const SAVING_SUMMARY: &str = "/api/savings/summary";
/// The route to access a single savings goal.
pub const SAVING: &str = "/api/savings/{saving_id}";
/// The route to record a deposit into a savings goal.
pub const SAVING_DEPOSITS: &str = "/api/savings/{saving_id}/deposits";
/// The route to delete a deposit.
pub const SAVING_DEPOSIT: &str = "/api/savings/deposits/{deposit_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{debt_id}' in '/api/debts/{debt_id}'. Only the first parameter is
/// replaced. If no parameter is found the original `endpoint_path` is
/// returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end..])
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::HEALTH,
            endpoints::DASHBOARD,
            endpoints::MONTHLY,
            endpoints::COMPARISON,
            endpoints::TRENDS,
            endpoints::CATEGORIES,
            endpoints::CATEGORY,
            endpoints::INCOMES,
            endpoints::INCOME_SUMMARY,
            endpoints::INCOME,
            endpoints::EXPENSES,
            endpoints::EXPENSE_SUMMARY,
            endpoints::EXPENSES_BY_CATEGORY,
            endpoints::EXPENSE,
            endpoints::DEBTS,
            endpoints::DEBT_SUMMARY,
            endpoints::DEBT,
            endpoints::DEBT_PAYMENTS,
            endpoints::DEBT_PAYMENT,
            endpoints::SAVINGS,
            endpoints::SAVING_SUMMARY,
            endpoints::SAVING,
            endpoints::SAVING_DEPOSITS,
            endpoints::SAVING_DEPOSIT,
        ] {
            assert!(
                format_endpoint(endpoint, 1).parse::<Uri>().is_ok(),
                "{endpoint} is not a valid URI"
            );
        }
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(format_endpoint("/api/debts/{debt_id}", 7), "/api/debts/7");
    }

    #[test]
    fn parameter_in_middle() {
        assert_eq!(
            format_endpoint("/api/debts/{debt_id}/payments", 7),
            "/api/debts/7/payments"
        );
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/api/debts", 7), "/api/debts");
    }
}

//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router, middleware,
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    analytics::{comparison_endpoint, dashboard_endpoint, monthly_endpoint, trends_endpoint},
    auth::auth_guard,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, update_category_endpoint,
    },
    debt::{
        add_payment_endpoint, create_debt_endpoint, debt_summary_endpoint, delete_debt_endpoint,
        delete_payment_endpoint, get_debt_endpoint, list_debts_endpoint, list_payments_endpoint,
        update_debt_endpoint,
    },
    endpoints,
    logging::logging_middleware,
    saving::{
        add_deposit_endpoint, create_saving_endpoint, delete_deposit_endpoint,
        delete_saving_endpoint, get_saving_endpoint, list_savings_endpoint,
        saving_summary_endpoint,
    },
    stores::LedgerStore,
    transaction::{
        create_expense_endpoint, create_income_endpoint, delete_expense_endpoint,
        delete_income_endpoint, expense_summary_endpoint, expenses_by_category_endpoint,
        get_expense_endpoint, get_income_endpoint, income_summary_endpoint,
        list_expenses_endpoint, list_incomes_endpoint, update_expense_endpoint,
        update_income_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every `/api` route requires the user ID header, see [auth_guard].
pub fn build_router<L>(state: AppState<L>) -> Router
where
    L: LedgerStore,
{
    let unprotected_routes = Router::new().route(endpoints::HEALTH, get(get_health));

    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD, get(dashboard_endpoint::<L>))
        .route(endpoints::MONTHLY, get(monthly_endpoint::<L>))
        .route(endpoints::COMPARISON, get(comparison_endpoint::<L>))
        .route(endpoints::TRENDS, get(trends_endpoint::<L>))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint::<L>).post(create_category_endpoint::<L>),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint::<L>)
                .patch(update_category_endpoint::<L>)
                .delete(delete_category_endpoint::<L>),
        )
        .route(
            endpoints::INCOMES,
            get(list_incomes_endpoint::<L>).post(create_income_endpoint::<L>),
        )
        .route(endpoints::INCOME_SUMMARY, get(income_summary_endpoint::<L>))
        .route(
            endpoints::INCOME,
            get(get_income_endpoint::<L>)
                .patch(update_income_endpoint::<L>)
                .delete(delete_income_endpoint::<L>),
        )
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint::<L>).post(create_expense_endpoint::<L>),
        )
        .route(endpoints::EXPENSE_SUMMARY, get(expense_summary_endpoint::<L>))
        .route(
            endpoints::EXPENSES_BY_CATEGORY,
            get(expenses_by_category_endpoint::<L>),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint::<L>)
                .patch(update_expense_endpoint::<L>)
                .delete(delete_expense_endpoint::<L>),
        )
        .route(
            endpoints::DEBTS,
            get(list_debts_endpoint::<L>).post(create_debt_endpoint::<L>),
        )
        .route(endpoints::DEBT_SUMMARY, get(debt_summary_endpoint::<L>))
        .route(
            endpoints::DEBT,
            get(get_debt_endpoint::<L>)
                .patch(update_debt_endpoint::<L>)
                .delete(delete_debt_endpoint::<L>),
        )
        .route(
            endpoints::DEBT_PAYMENTS,
            get(list_payments_endpoint::<L>).post(add_payment_endpoint::<L>),
        )
        .route(endpoints::DEBT_PAYMENT, delete(delete_payment_endpoint::<L>))
        .route(
            endpoints::SAVINGS,
            get(list_savings_endpoint::<L>).post(create_saving_endpoint::<L>),
        )
        .route(endpoints::SAVING_SUMMARY, get(saving_summary_endpoint::<L>))
        .route(
            endpoints::SAVING,
            get(get_saving_endpoint::<L>).delete(delete_saving_endpoint::<L>),
        )
        .route(endpoints::SAVING_DEPOSITS, post(add_deposit_endpoint::<L>))
        .route(endpoints::SAVING_DEPOSIT, delete(delete_deposit_endpoint::<L>))
        .route_layer(middleware::from_fn(auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

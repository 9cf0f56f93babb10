//! HTTP endpoints for debts and debt payments.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    debt::{
        Debt, DebtId, DebtInput, DebtPayment, DebtPaymentId, DebtPaymentInput, DebtSummary,
        DebtUpdate, DebtWithPayments, add_payment, create_debt, delete_payment, edit_debt,
        get_debt_with_payments, list_payments, summarize_debts,
    },
    response::{DataResponse, Message, created, data, message},
    stores::{DebtStore, LedgerStore},
};

/// Query parameters for listing debts.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtFilter {
    /// Only return debts that are (or are not) paid off.
    pub is_paid_off: Option<bool>,
}

pub async fn list_debts_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Query(filter): Query<DebtFilter>,
) -> Result<Json<DataResponse<Vec<Debt>>>, Error>
where
    L: LedgerStore,
{
    state.ledger.get_debts(user_id, filter.is_paid_off).map(data)
}

pub async fn get_debt_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(debt_id): Path<DebtId>,
) -> Result<Json<DataResponse<DebtWithPayments>>, Error>
where
    L: LedgerStore,
{
    get_debt_with_payments(&state.ledger, user_id, debt_id).map(data)
}

pub async fn create_debt_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Json(input): Json<DebtInput>,
) -> Result<(StatusCode, Json<DataResponse<Debt>>), Error>
where
    L: LedgerStore,
{
    create_debt(&state.ledger, user_id, input).map(created)
}

pub async fn update_debt_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(debt_id): Path<DebtId>,
    Json(update): Json<DebtUpdate>,
) -> Result<Json<DataResponse<Debt>>, Error>
where
    L: LedgerStore,
{
    edit_debt(&state.ledger, user_id, debt_id, update).map(data)
}

/// Delete a debt and its payment history.
pub async fn delete_debt_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(debt_id): Path<DebtId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    state.ledger.delete_debt(user_id, debt_id)?;

    Ok(message("Debt deleted"))
}

pub async fn list_payments_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(debt_id): Path<DebtId>,
) -> Result<Json<DataResponse<Vec<DebtPayment>>>, Error>
where
    L: LedgerStore,
{
    list_payments(&state.ledger, user_id, debt_id).map(data)
}

pub async fn add_payment_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(debt_id): Path<DebtId>,
    Json(input): Json<DebtPaymentInput>,
) -> Result<(StatusCode, Json<DataResponse<DebtPayment>>), Error>
where
    L: LedgerStore,
{
    add_payment(&state.ledger, user_id, debt_id, input).map(created)
}

pub async fn delete_payment_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(payment_id): Path<DebtPaymentId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    delete_payment(&state.ledger, user_id, payment_id)?;

    Ok(message("Payment deleted"))
}

pub async fn debt_summary_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DataResponse<DebtSummary>>, Error>
where
    L: LedgerStore,
{
    summarize_debts(&state.ledger, user_id).map(data)
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Json,
        extract::{Path, Query, State},
    };
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        UserID,
        debt::{DebtInput, DebtPaymentInput},
        test_utils::get_test_app_state,
    };

    use super::{
        DebtFilter, add_payment_endpoint, create_debt_endpoint, get_debt_endpoint,
        list_debts_endpoint,
    };

    #[tokio::test]
    async fn get_debt_includes_payments() {
        let state = get_test_app_state();
        let user_id = UserID::new(1);
        let (_, Json(created)) = create_debt_endpoint(
            State(state.clone()),
            Extension(user_id),
            Json(DebtInput {
                name: "Laptop".to_owned(),
                total_amount: Decimal::from(1500),
                interest_rate: None,
                minimum_payment: None,
                due_date: None,
                start_date: date!(2024 - 01 - 01),
                category_id: None,
            }),
        )
        .await
        .unwrap();
        add_payment_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(created.data.id),
            Json(DebtPaymentInput {
                amount: Decimal::from(500),
                date: date!(2024 - 02 - 01),
                note: Some("First instalment".to_owned()),
            }),
        )
        .await
        .unwrap();

        let Json(response) = get_debt_endpoint(State(state), Extension(user_id), Path(created.data.id))
            .await
            .unwrap();

        assert_eq!(response.data.debt.remaining_amount, Decimal::from(1000));
        assert_eq!(response.data.payments.len(), 1);
    }

    #[tokio::test]
    async fn list_only_active_debts() {
        let state = get_test_app_state();

        let Json(response) = list_debts_endpoint(
            State(state),
            Extension(UserID::new(1)),
            Query(DebtFilter {
                is_paid_off: Some(false),
            }),
        )
        .await
        .unwrap();

        assert!(response.data.is_empty());
    }
}

//! HTTP endpoints for savings goals and deposits.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState, Error, UserID,
    response::{DataResponse, Message, created, data, message},
    saving::{
        Saving, SavingDeposit, SavingDepositId, SavingDepositInput, SavingId, SavingInput,
        SavingSummary, SavingWithDeposits, add_deposit, create_saving, delete_deposit,
        get_saving_with_deposits, summarize_savings,
    },
    stores::{LedgerStore, SavingStore},
};

pub async fn list_savings_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DataResponse<Vec<Saving>>>, Error>
where
    L: LedgerStore,
{
    state.ledger.get_savings(user_id).map(data)
}

pub async fn get_saving_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(saving_id): Path<SavingId>,
) -> Result<Json<DataResponse<SavingWithDeposits>>, Error>
where
    L: LedgerStore,
{
    get_saving_with_deposits(&state.ledger, user_id, saving_id).map(data)
}

pub async fn create_saving_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Json(input): Json<SavingInput>,
) -> Result<(StatusCode, Json<DataResponse<Saving>>), Error>
where
    L: LedgerStore,
{
    create_saving(&state.ledger, user_id, input).map(created)
}

pub async fn delete_saving_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(saving_id): Path<SavingId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    state.ledger.delete_saving(user_id, saving_id)?;

    Ok(message("Saving deleted"))
}

pub async fn add_deposit_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(saving_id): Path<SavingId>,
    Json(input): Json<SavingDepositInput>,
) -> Result<(StatusCode, Json<DataResponse<SavingDeposit>>), Error>
where
    L: LedgerStore,
{
    add_deposit(&state.ledger, user_id, saving_id, input).map(created)
}

pub async fn delete_deposit_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
    Path(deposit_id): Path<SavingDepositId>,
) -> Result<Json<Message>, Error>
where
    L: LedgerStore,
{
    delete_deposit(&state.ledger, user_id, deposit_id)?;

    Ok(message("Deposit deleted"))
}

pub async fn saving_summary_endpoint<L>(
    State(state): State<AppState<L>>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<DataResponse<SavingSummary>>, Error>
where
    L: LedgerStore,
{
    summarize_savings(&state.ledger, user_id).map(data)
}

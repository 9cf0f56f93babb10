//! Keeps each savings goal's current amount consistent with its deposits.

use rust_decimal::Decimal;

use crate::{
    Error, UserID,
    money::{add_amount, require_positive},
    saving::{
        NewSaving, NewSavingDeposit, Saving, SavingDeposit, SavingDepositId, SavingDepositInput,
        SavingId, SavingInput, SavingSummary, SavingWithDeposits,
    },
    stores::SavingStore,
};

/// The current amount of a goal after a deposit of `amount` is removed.
pub fn current_after_deposit_removed(saving: &Saving, amount: Decimal) -> Decimal {
    (saving.current_amount - amount).max(Decimal::ZERO)
}

/// Validate and store a new savings goal.
///
/// # Errors
///
/// Returns an [Error::Validation] for an empty name or a non-positive target.
pub fn create_saving<S>(store: &S, user_id: UserID, input: SavingInput) -> Result<Saving, Error>
where
    S: SavingStore,
{
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }

    store.create_saving(
        user_id,
        NewSaving {
            name: name.to_owned(),
            target_amount: require_positive("targetAmount", input.target_amount)?,
            target_date: input.target_date,
            description: input.description,
            color: input.color,
        },
    )
}

/// Record a deposit into a goal owned by `user_id`.
///
/// Deposits may take a goal past its target.
pub fn add_deposit<S>(
    store: &S,
    user_id: UserID,
    saving_id: SavingId,
    input: SavingDepositInput,
) -> Result<SavingDeposit, Error>
where
    S: SavingStore,
{
    let deposit = NewSavingDeposit {
        amount: require_positive("amount", input.amount)?,
        date: input.date,
        note: input.note,
    };

    store.add_saving_deposit(user_id, saving_id, deposit, |saving, deposit| {
        add_amount(saving.current_amount, deposit.amount)
    })
}

/// Delete a deposit and take its amount back out of the goal.
pub fn delete_deposit<S>(
    store: &S,
    user_id: UserID,
    deposit_id: SavingDepositId,
) -> Result<SavingDeposit, Error>
where
    S: SavingStore,
{
    store.delete_saving_deposit(user_id, deposit_id, |saving, deposit| {
        Ok(current_after_deposit_removed(saving, deposit.amount))
    })
}

/// Get a goal owned by `user_id` with its deposits, newest first.
pub fn get_saving_with_deposits<S>(
    store: &S,
    user_id: UserID,
    saving_id: SavingId,
) -> Result<SavingWithDeposits, Error>
where
    S: SavingStore,
{
    let saving = store.get_saving(user_id, saving_id)?;
    let deposits = store.get_saving_deposits(saving.id)?;

    Ok(SavingWithDeposits { saving, deposits })
}

pub fn summarize_savings<S>(store: &S, user_id: UserID) -> Result<SavingSummary, Error>
where
    S: SavingStore,
{
    let savings = store.get_savings(user_id)?;

    SavingSummary::from_savings(&savings)
}

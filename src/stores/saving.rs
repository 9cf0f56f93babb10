//! Defines the savings goal store trait.

use rust_decimal::Decimal;

use crate::{
    Error, UserID,
    saving::{NewSaving, NewSavingDeposit, Saving, SavingDeposit, SavingDepositId, SavingId},
};

/// Stores savings goals and the deposits made into them.
///
/// As with [DebtStore](crate::stores::DebtStore), balance changes are computed
/// by a closure inside the store's atomic unit.
pub trait SavingStore {
    /// Create a new savings goal owned by `user_id` with nothing saved yet.
    fn create_saving(&self, user_id: UserID, saving: NewSaving) -> Result<Saving, Error>;

    /// Retrieve a savings goal owned by `user_id`.
    fn get_saving(&self, user_id: UserID, saving_id: SavingId) -> Result<Saving, Error>;

    /// Retrieve the savings goals owned by `user_id`, in order of creation.
    fn get_savings(&self, user_id: UserID) -> Result<Vec<Saving>, Error>;

    /// Delete a savings goal owned by `user_id` and all of its deposits.
    fn delete_saving(&self, user_id: UserID, saving_id: SavingId) -> Result<(), Error>;

    /// Retrieve the deposits made into `saving_id`, newest first.
    fn get_saving_deposits(&self, saving_id: SavingId) -> Result<Vec<SavingDeposit>, Error>;

    /// Record `deposit` and set the goal's current amount to the result of
    /// `next_current`, atomically.
    fn add_saving_deposit<F>(
        &self,
        user_id: UserID,
        saving_id: SavingId,
        deposit: NewSavingDeposit,
        next_current: F,
    ) -> Result<SavingDeposit, Error>
    where
        F: FnOnce(&Saving, &NewSavingDeposit) -> Result<Decimal, Error>;

    /// Delete a deposit whose goal is owned by `user_id` and set the goal's
    /// current amount to the result of `next_current`, atomically.
    fn delete_saving_deposit<F>(
        &self,
        user_id: UserID,
        deposit_id: SavingDepositId,
        next_current: F,
    ) -> Result<SavingDeposit, Error>
    where
        F: FnOnce(&Saving, &SavingDeposit) -> Result<Decimal, Error>;
}

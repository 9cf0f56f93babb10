//! Defines the debt store trait.

use rust_decimal::Decimal;

use crate::{
    Error, UserID,
    debt::{Debt, DebtId, DebtPayment, DebtPaymentId, NewDebt, NewDebtPayment},
};

/// Stores debts and the payments made against them.
///
/// Methods that change a debt's remaining amount take a closure that computes
/// the new balance from the current one. Implementations must run the read,
/// the closure and the writes as one atomic unit so that concurrent payments
/// cannot interleave.
pub trait DebtStore {
    /// Create a new debt owned by `user_id` whose remaining amount equals its
    /// total amount.
    fn create_debt(&self, user_id: UserID, debt: NewDebt) -> Result<Debt, Error>;

    /// Retrieve a debt owned by `user_id`.
    fn get_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<Debt, Error>;

    /// Retrieve the debts owned by `user_id`, newest start date first.
    ///
    /// If `settled` is set, only debts that are (or are not) paid off are returned.
    fn get_debts(&self, user_id: UserID, settled: Option<bool>) -> Result<Vec<Debt>, Error>;

    /// Replace a debt with the result of `edit`, atomically.
    ///
    /// `edit` receives the current debt. If it returns an error nothing is
    /// written.
    fn update_debt<F>(&self, user_id: UserID, debt_id: DebtId, edit: F) -> Result<Debt, Error>
    where
        F: FnOnce(Debt) -> Result<Debt, Error>;

    /// Delete a debt owned by `user_id` and all of its payments.
    fn delete_debt(&self, user_id: UserID, debt_id: DebtId) -> Result<(), Error>;

    /// Retrieve the payments made against `debt_id`, newest first.
    fn get_debt_payments(&self, debt_id: DebtId) -> Result<Vec<DebtPayment>, Error>;

    /// Record `payment` against a debt owned by `user_id` and set the debt's
    /// remaining amount to the result of `next_remaining`, atomically.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the user does not own the debt, or the
    /// error from `next_remaining`, in which case nothing is written.
    fn add_debt_payment<F>(
        &self,
        user_id: UserID,
        debt_id: DebtId,
        payment: NewDebtPayment,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &NewDebtPayment) -> Result<Decimal, Error>;

    /// Delete a payment whose debt is owned by `user_id` and set the debt's
    /// remaining amount to the result of `next_remaining`, atomically.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if the payment does not exist or its debt
    /// is owned by someone else.
    fn delete_debt_payment<F>(
        &self,
        user_id: UserID,
        payment_id: DebtPaymentId,
        next_remaining: F,
    ) -> Result<DebtPayment, Error>
    where
        F: FnOnce(&Debt, &DebtPayment) -> Result<Decimal, Error>;
}

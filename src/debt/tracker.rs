//! Keeps each debt's remaining amount consistent with its payments.
//!
//! The balance rules are plain functions. The operations pass them to the
//! store, which evaluates them inside the same atomic unit as the writes.

use rust_decimal::Decimal;

use crate::{
    Error, UserID,
    category::{DEBT_CATEGORY_TYPES, check_category},
    debt::{
        Debt, DebtId, DebtInput, DebtPayment, DebtPaymentId, DebtPaymentInput, DebtSummary,
        DebtUpdate, DebtWithPayments, NewDebt, NewDebtPayment,
    },
    money::{require_non_negative, require_positive},
    stores::{CategoryStore, DebtStore},
};

/// The remaining amount after paying `amount` off `debt`.
///
/// Overpayments settle the debt without making the balance negative.
///
/// # Errors
///
/// Returns an [Error::InvalidState] if the debt is already paid off.
pub fn remaining_after_payment(debt: &Debt, amount: Decimal) -> Result<Decimal, Error> {
    if debt.is_settled() {
        return Err(Error::InvalidState(format!(
            "the debt \"{}\" is already paid off",
            debt.name
        )));
    }

    Ok((debt.remaining_amount - amount).max(Decimal::ZERO))
}

/// The remaining amount after a payment of `amount` is removed from `debt`.
///
/// The balance never exceeds the debt's total, which matters when the removed
/// payment was an overpayment that had been clamped at zero.
pub fn remaining_after_payment_removed(debt: &Debt, amount: Decimal) -> Decimal {
    let restored = debt.remaining_amount + amount;

    if restored > debt.total_amount {
        tracing::debug!(
            "Capping the balance of debt {} at its total {} instead of {restored}",
            debt.id,
            debt.total_amount
        );
        debt.total_amount
    } else {
        restored
    }
}

/// The remaining amount of `debt` after its total changes to `new_total`.
///
/// The amount already paid is kept, so the balance moves by the same amount
/// as the total, but never below zero.
pub fn remaining_after_total_change(debt: &Debt, new_total: Decimal) -> Decimal {
    (new_total - debt.paid_amount()).max(Decimal::ZERO)
}

fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::validation("name", "cannot be empty"));
    }

    Ok(name.to_owned())
}

fn validate_optional_terms(
    interest_rate: Option<Decimal>,
    minimum_payment: Option<Decimal>,
) -> Result<(), Error> {
    if let Some(rate) = interest_rate {
        require_non_negative("interestRate", rate)?;
    }

    if let Some(payment) = minimum_payment {
        require_positive("minimumPayment", payment)?;
    }

    Ok(())
}

/// Validate and store a new debt. Nothing has been paid off a new debt.
///
/// # Errors
///
/// Returns an [Error::Validation] for an empty name, a non-positive total or
/// minimum payment, or a negative interest rate, and an
/// [Error::InvalidCategory] if the category is not a debt category visible
/// to the user.
pub fn create_debt<S>(store: &S, user_id: UserID, input: DebtInput) -> Result<Debt, Error>
where
    S: CategoryStore + DebtStore,
{
    let name = validate_name(&input.name)?;
    let total_amount = require_positive("totalAmount", input.total_amount)?;
    validate_optional_terms(input.interest_rate, input.minimum_payment)?;

    if let Some(category_id) = input.category_id {
        check_category(store, user_id, category_id, DEBT_CATEGORY_TYPES)?;
    }

    store.create_debt(
        user_id,
        NewDebt {
            name,
            total_amount,
            interest_rate: input.interest_rate,
            minimum_payment: input.minimum_payment,
            due_date: input.due_date,
            start_date: input.start_date,
            category_id: input.category_id,
        },
    )
}

/// Apply `update` to a debt owned by `user_id`.
///
/// If the total changes, the remaining amount is recomputed so that the
/// amount already paid stays the same.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the user does not own the debt, and the
/// same validation errors as [create_debt].
pub fn edit_debt<S>(
    store: &S,
    user_id: UserID,
    debt_id: DebtId,
    update: DebtUpdate,
) -> Result<Debt, Error>
where
    S: CategoryStore + DebtStore,
{
    let name = update.name.as_deref().map(validate_name).transpose()?;
    let new_total = update
        .total_amount
        .map(|total| require_positive("totalAmount", total))
        .transpose()?;
    validate_optional_terms(
        update.interest_rate.as_set().copied(),
        update.minimum_payment.as_set().copied(),
    )?;

    if let Some(category_id) = update.category_id.as_set() {
        check_category(store, user_id, *category_id, DEBT_CATEGORY_TYPES)?;
    }

    store.update_debt(user_id, debt_id, |mut debt| {
        if let Some(new_total) = new_total.filter(|total| *total != debt.total_amount) {
            debt.remaining_amount = remaining_after_total_change(&debt, new_total);
            debt.total_amount = new_total;
        }

        debt.name = name.unwrap_or(debt.name);
        debt.interest_rate = update.interest_rate.apply(debt.interest_rate);
        debt.minimum_payment = update.minimum_payment.apply(debt.minimum_payment);
        debt.due_date = update.due_date.apply(debt.due_date);
        debt.start_date = update.start_date.unwrap_or(debt.start_date);
        debt.category_id = update.category_id.apply(debt.category_id);

        Ok(debt)
    })
}

/// Record a payment against a debt owned by `user_id`.
///
/// # Errors
///
/// Returns an [Error::Validation] for a non-positive amount, an
/// [Error::NotFound] if the user does not own the debt, or an
/// [Error::InvalidState] if the debt is already paid off. Nothing is written
/// on error.
pub fn add_payment<S>(
    store: &S,
    user_id: UserID,
    debt_id: DebtId,
    input: DebtPaymentInput,
) -> Result<DebtPayment, Error>
where
    S: DebtStore,
{
    let payment = NewDebtPayment {
        amount: require_positive("amount", input.amount)?,
        date: input.date,
        note: input.note,
    };

    store
        .add_debt_payment(user_id, debt_id, payment, |debt, payment| {
            remaining_after_payment(debt, payment.amount)
        })
        .inspect(|payment| {
            tracing::debug!("Recorded payment {} against debt {debt_id}", payment.id)
        })
}

/// Delete a payment and give its amount back to the debt's balance.
///
/// # Errors
///
/// Returns an [Error::NotFound] if the payment does not exist or its debt is
/// owned by another user.
pub fn delete_payment<S>(
    store: &S,
    user_id: UserID,
    payment_id: DebtPaymentId,
) -> Result<DebtPayment, Error>
where
    S: DebtStore,
{
    store.delete_debt_payment(user_id, payment_id, |debt, payment| {
        Ok(remaining_after_payment_removed(debt, payment.amount))
    })
}

/// Get a debt owned by `user_id` with its payments, newest first.
pub fn get_debt_with_payments<S>(
    store: &S,
    user_id: UserID,
    debt_id: DebtId,
) -> Result<DebtWithPayments, Error>
where
    S: DebtStore,
{
    let debt = store.get_debt(user_id, debt_id)?;
    let payments = store.get_debt_payments(debt.id)?;

    Ok(DebtWithPayments { debt, payments })
}

/// Get the payments made against a debt owned by `user_id`.
pub fn list_payments<S>(store: &S, user_id: UserID, debt_id: DebtId) -> Result<Vec<DebtPayment>, Error>
where
    S: DebtStore,
{
    let debt = store.get_debt(user_id, debt_id)?;

    store.get_debt_payments(debt.id)
}

/// Summarise all of the debts owned by `user_id`.
pub fn summarize_debts<S>(store: &S, user_id: UserID) -> Result<DebtSummary, Error>
where
    S: DebtStore,
{
    let debts = store.get_debts(user_id, None)?;

    DebtSummary::from_debts(&debts)
}

#[cfg(test)]
mod balance_rule_tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{Error, UserID, debt::Debt};

    use super::{
        remaining_after_payment, remaining_after_payment_removed, remaining_after_total_change,
    };

    fn debt(total: i64, remaining: i64) -> Debt {
        Debt {
            id: 1,
            name: "Credit card".to_owned(),
            total_amount: Decimal::from(total),
            remaining_amount: Decimal::from(remaining),
            interest_rate: None,
            minimum_payment: None,
            due_date: None,
            start_date: date!(2024 - 01 - 01),
            category_id: None,
            user_id: UserID::new(1),
        }
    }

    #[test]
    fn payment_reduces_balance() {
        assert_eq!(
            remaining_after_payment(&debt(1000, 1000), Decimal::from(300)),
            Ok(Decimal::from(700))
        );
    }

    #[test]
    fn overpayment_clamps_at_zero() {
        assert_eq!(
            remaining_after_payment(&debt(1000, 100), Decimal::from(300)),
            Ok(Decimal::ZERO)
        );
    }

    #[test]
    fn payment_on_settled_debt_is_invalid() {
        let result = remaining_after_payment(&debt(1000, 0), Decimal::from(1));

        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn removed_payment_restores_balance() {
        assert_eq!(
            remaining_after_payment_removed(&debt(1000, 700), Decimal::from(300)),
            Decimal::from(1000)
        );
    }

    #[test]
    fn removed_overpayment_is_capped_at_total() {
        assert_eq!(
            remaining_after_payment_removed(&debt(1000, 0), Decimal::from(1500)),
            Decimal::from(1000)
        );
    }

    #[test]
    fn total_change_keeps_amount_paid() {
        assert_eq!(
            remaining_after_total_change(&debt(1000, 700), Decimal::from(1200)),
            Decimal::from(900)
        );
    }

    #[test]
    fn total_below_amount_paid_settles_debt() {
        assert_eq!(
            remaining_after_total_change(&debt(1000, 200), Decimal::from(500)),
            Decimal::ZERO
        );
    }
}

#[cfg(test)]
mod operation_tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::{
        Error, UserID,
        category::CategoryType,
        debt::{DebtInput, DebtPaymentInput, DebtUpdate},
        patch::Patch,
        stores::{CategoryStore, DebtStore, sqlite::get_test_ledger},
    };

    use super::{
        add_payment, create_debt, delete_payment, edit_debt, list_payments, summarize_debts,
    };

    fn loan(total: i64) -> DebtInput {
        DebtInput {
            name: "Car loan".to_owned(),
            total_amount: Decimal::from(total),
            interest_rate: Some(Decimal::new(55, 1)),
            minimum_payment: Some(Decimal::from(100)),
            due_date: Some(date!(2026 - 01 - 01)),
            start_date: date!(2024 - 01 - 01),
            category_id: None,
        }
    }

    fn pay(amount: i64) -> DebtPaymentInput {
        DebtPaymentInput {
            amount: Decimal::from(amount),
            date: date!(2024 - 02 - 01),
            note: None,
        }
    }

    #[test]
    fn concurrent_payments_are_all_applied() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(1000)).unwrap();
        let payers = 8;
        let payments_per_payer = 5;

        std::thread::scope(|scope| {
            for _ in 0..payers {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..payments_per_payer {
                        add_payment(&store, user_id, debt.id, pay(10)).unwrap();
                    }
                });
            }
        });

        let paid = store.get_debt(user_id, debt.id).unwrap();
        let payments = list_payments(&store, user_id, debt.id).unwrap();
        assert_eq!(payments.len(), payers * payments_per_payer);
        assert_eq!(paid.remaining_amount, Decimal::from(1000 - 10 * 8 * 5));
    }

    #[test]
    fn create_sets_remaining_to_total() {
        let store = get_test_ledger();

        let debt = create_debt(&store, UserID::new(1), loan(1000)).unwrap();

        assert_eq!(debt.remaining_amount, debt.total_amount);
    }

    #[test]
    fn create_rejects_negative_interest() {
        let store = get_test_ledger();
        let input = DebtInput {
            interest_rate: Some(Decimal::from(-1)),
            ..loan(1000)
        };

        let result = create_debt(&store, UserID::new(1), input);

        assert!(matches!(result, Err(Error::Validation { field: "interestRate", .. })));
    }

    #[test]
    fn create_requires_debt_category() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let rent = store
            .get_visible_categories(user_id, Some(CategoryType::Fixed))
            .unwrap()[0]
            .id;
        let input = DebtInput {
            category_id: Some(rent),
            ..loan(1000)
        };

        let result = create_debt(&store, user_id, input);

        assert!(matches!(result, Err(Error::InvalidCategory(..))));
    }

    #[test]
    fn payment_history_scenario() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(1000)).unwrap();
        let remaining = || store.get_debt(user_id, debt.id).unwrap().remaining_amount;

        let first = add_payment(&store, user_id, debt.id, pay(300)).unwrap();
        assert_eq!(remaining(), Decimal::from(700));

        edit_debt(
            &store,
            user_id,
            debt.id,
            DebtUpdate {
                total_amount: Some(Decimal::from(1200)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(remaining(), Decimal::from(900));

        add_payment(&store, user_id, debt.id, pay(200)).unwrap();
        assert_eq!(remaining(), Decimal::from(700));

        delete_payment(&store, user_id, first.id).unwrap();
        assert_eq!(remaining(), Decimal::from(1000));
    }

    #[test]
    fn deleting_payment_then_lowering_total_keeps_amount_paid() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(1200)).unwrap();
        let remaining = || store.get_debt(user_id, debt.id).unwrap().remaining_amount;

        add_payment(&store, user_id, debt.id, pay(200)).unwrap();
        assert_eq!(remaining(), Decimal::from(1000));
        let second = add_payment(
            &store,
            user_id,
            debt.id,
            DebtPaymentInput {
                date: date!(2024 - 03 - 01),
                ..pay(300)
            },
        )
        .unwrap();
        assert_eq!(remaining(), Decimal::from(700));

        delete_payment(&store, user_id, second.id).unwrap();
        assert_eq!(remaining(), Decimal::from(1000));

        edit_debt(
            &store,
            user_id,
            debt.id,
            DebtUpdate {
                total_amount: Some(Decimal::from(1000)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(remaining(), Decimal::from(800));
    }

    #[test]
    fn payment_on_settled_debt_has_no_side_effect() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(100)).unwrap();
        add_payment(&store, user_id, debt.id, pay(150)).unwrap();
        let settled = store.get_debt(user_id, debt.id).unwrap();
        assert_eq!(settled.remaining_amount, Decimal::ZERO);

        let result = add_payment(&store, user_id, debt.id, pay(10));

        assert!(matches!(result, Err(Error::InvalidState(_))));
        assert_eq!(store.get_debt(user_id, debt.id), Ok(settled));
        assert_eq!(store.get_debt_payments(debt.id).unwrap().len(), 1);
    }

    #[test]
    fn non_positive_payment_is_invalid() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(100)).unwrap();

        let result = add_payment(&store, user_id, debt.id, pay(0));

        assert!(matches!(result, Err(Error::Validation { field: "amount", .. })));
    }

    #[test]
    fn balance_stays_within_bounds() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(500)).unwrap();

        let overpayment = add_payment(&store, user_id, debt.id, pay(800)).unwrap();
        edit_debt(
            &store,
            user_id,
            debt.id,
            DebtUpdate {
                total_amount: Some(Decimal::from(600)),
                ..Default::default()
            },
        )
        .unwrap();
        delete_payment(&store, user_id, overpayment.id).unwrap();

        let debt = store.get_debt(user_id, debt.id).unwrap();
        assert!(debt.remaining_amount >= Decimal::ZERO);
        assert!(debt.remaining_amount <= debt.total_amount);
    }

    #[test]
    fn edit_clears_optional_fields() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let debt = create_debt(&store, user_id, loan(1000)).unwrap();

        let edited = edit_debt(
            &store,
            user_id,
            debt.id,
            DebtUpdate {
                name: Some("Van loan".to_owned()),
                interest_rate: Patch::Clear,
                due_date: Patch::Clear,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(edited.name, "Van loan");
        assert_eq!(edited.interest_rate, None);
        assert_eq!(edited.due_date, None);
        assert_eq!(edited.minimum_payment, debt.minimum_payment);
        assert_eq!(edited.remaining_amount, debt.remaining_amount);
    }

    #[test]
    fn delete_payment_of_other_user_is_not_found() {
        let store = get_test_ledger();
        let debt = create_debt(&store, UserID::new(1), loan(1000)).unwrap();
        let payment = add_payment(&store, UserID::new(1), debt.id, pay(100)).unwrap();

        assert_eq!(
            delete_payment(&store, UserID::new(2), payment.id),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn summary_counts_active_and_paid_off() {
        let store = get_test_ledger();
        let user_id = UserID::new(1);
        let active = create_debt(&store, user_id, loan(1000)).unwrap();
        let paid_off = create_debt(&store, user_id, loan(200)).unwrap();
        add_payment(&store, user_id, active.id, pay(250)).unwrap();
        add_payment(&store, user_id, paid_off.id, pay(200)).unwrap();

        let summary = summarize_debts(&store, user_id).unwrap();

        assert_eq!(summary.total_debt, Decimal::from(1200));
        assert_eq!(summary.total_remaining, Decimal::from(750));
        assert_eq!(summary.total_paid, Decimal::from(450));
        assert_eq!(summary.active_debts, 1);
        assert_eq!(summary.paid_off_debts, 1);
        assert_eq!(summary.debt_count, 2);
    }
}

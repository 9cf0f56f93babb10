//! Debts, the payments made against them and their outstanding balances.

mod domain;
mod handlers;
mod tracker;

pub use domain::{
    Debt, DebtId, DebtInput, DebtPayment, DebtPaymentId, DebtPaymentInput, DebtSummary,
    DebtUpdate, DebtWithPayments, NewDebt, NewDebtPayment,
};
pub use handlers::{
    DebtFilter, add_payment_endpoint, create_debt_endpoint, debt_summary_endpoint,
    delete_debt_endpoint, delete_payment_endpoint, get_debt_endpoint, list_debts_endpoint,
    list_payments_endpoint, update_debt_endpoint,
};
pub use tracker::{
    add_payment, create_debt, delete_payment, edit_debt, get_debt_with_payments, list_payments,
    remaining_after_payment, remaining_after_payment_removed, remaining_after_total_change,
    summarize_debts,
};

//! Savings goals and the deposits made into them.

mod domain;
mod handlers;
mod tracker;

pub use domain::{
    NewSaving, NewSavingDeposit, Saving, SavingDeposit, SavingDepositId, SavingDepositInput,
    SavingId, SavingInput, SavingSummary, SavingWithDeposits,
};
pub use handlers::{
    add_deposit_endpoint, create_saving_endpoint, delete_deposit_endpoint, delete_saving_endpoint,
    get_saving_endpoint, list_savings_endpoint, saving_summary_endpoint,
};
pub use tracker::{
    add_deposit, create_saving, current_after_deposit_removed, delete_deposit,
    get_saving_with_deposits, summarize_savings,
};

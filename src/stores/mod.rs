//! Contains traits and implementations for objects that store the ledger's
//! records.

mod category;
mod debt;
mod saving;
mod transaction;

pub mod sqlite;

pub use category::CategoryStore;
pub use debt::DebtStore;
pub use saving::SavingStore;
pub use transaction::{
    AmountTotal, CategoryTotal, SourceTotal, TransactionFilter, TransactionQuery, TransactionStore,
};

/// Everything the HTTP layer needs from a backend.
pub trait LedgerStore:
    CategoryStore + TransactionStore + DebtStore + SavingStore + Clone + Send + Sync + 'static
{
}

impl<T> LedgerStore for T where
    T: CategoryStore + TransactionStore + DebtStore + SavingStore + Clone + Send + Sync + 'static
{
}

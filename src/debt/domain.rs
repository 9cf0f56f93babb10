//! Core debt domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, UserID, category::CategoryId, money::add_amount, patch::Patch};

/// Database identifier for a debt.
pub type DebtId = i64;

/// Database identifier for a debt payment.
pub type DebtPaymentId = i64;

/// Money owed by a user and the part of it that is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<Date>,
    pub start_date: Date,
    pub category_id: Option<CategoryId>,
    pub user_id: UserID,
}

impl Debt {
    /// Whether nothing is left to pay.
    pub fn is_settled(&self) -> bool {
        self.remaining_amount <= Decimal::ZERO
    }

    /// The amount paid off so far.
    pub fn paid_amount(&self) -> Decimal {
        self.total_amount - self.remaining_amount
    }
}

/// A single payment made towards a debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayment {
    pub id: DebtPaymentId,
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
    pub debt_id: DebtId,
}

/// A debt together with its payment history, newest payment first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtWithPayments {
    #[serde(flatten)]
    pub debt: Debt,
    pub payments: Vec<DebtPayment>,
}

/// A validated debt that has not been stored yet.
///
/// The remaining amount of a new debt is always its total amount.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub name: String,
    pub total_amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<Date>,
    pub start_date: Date,
    pub category_id: Option<CategoryId>,
}

/// A validated payment that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDebtPayment {
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
}

/// The request body for creating a debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtInput {
    pub name: String,
    pub total_amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<Date>,
    pub start_date: Date,
    pub category_id: Option<CategoryId>,
}

/// The request body for editing a debt.
///
/// Absent fields are left unchanged. The optional fields can be cleared
/// with an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtUpdate {
    pub name: Option<String>,
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub interest_rate: Patch<Decimal>,
    #[serde(default)]
    pub minimum_payment: Patch<Decimal>,
    #[serde(default)]
    pub due_date: Patch<Date>,
    pub start_date: Option<Date>,
    #[serde(default)]
    pub category_id: Patch<CategoryId>,
}

/// The request body for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPaymentInput {
    pub amount: Decimal,
    pub date: Date,
    pub note: Option<String>,
}

/// Totals over all of a user's debts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub total_debt: Decimal,
    pub total_remaining: Decimal,
    pub total_paid: Decimal,
    pub active_debts: u64,
    pub paid_off_debts: u64,
    pub debt_count: u64,
}

impl DebtSummary {
    /// Summarise `debts`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::AmountOverflow] if a total does not fit in a [Decimal].
    pub fn from_debts(debts: &[Debt]) -> Result<Self, Error> {
        debts.iter().try_fold(DebtSummary::default(), |mut summary, debt| {
            summary.total_debt = add_amount(summary.total_debt, debt.total_amount)?;
            summary.total_remaining = add_amount(summary.total_remaining, debt.remaining_amount)?;
            summary.total_paid = add_amount(summary.total_paid, debt.paid_amount())?;
            summary.debt_count += 1;

            if debt.is_settled() {
                summary.paid_off_debts += 1;
            } else {
                summary.active_debts += 1;
            }

            Ok(summary)
        })
    }
}
